use contest_client::{
    api::{dom, render::escape_html, section_id, EntryId, DEFAULT_CSRF_FIELD},
    Config,
};
use contest_mock_server::{MockServer, CSRF_TOKEN};
use rand::Rng;

const AUTHORS: &[&str] = &["Alice", "Bob", "Carol", "Dave"];
const COMMENT_MAX_WORDS: usize = 25;

#[derive(structopt::StructOpt)]
struct Opt {
    /// Number of contest entries on the page
    #[structopt(short, long, default_value = "6")]
    entries: u64,

    /// Most comments a single entry gets
    #[structopt(long, default_value = "8")]
    max_comments: usize,

    /// Module generated by wasm-bindgen for the contest-web crate
    #[structopt(long, default_value = "./pkg/contest_web.js")]
    script: String,

    /// Show the join control of an already signed-in visitor
    #[structopt(long)]
    signed_in: bool,

    /// Log level passed to the page through its configuration
    #[structopt(long, default_value = "debug")]
    log_level: String,
}

fn gen_server(opt: &Opt) -> MockServer {
    let mut rng = rand::thread_rng();
    let mut server = MockServer::new();
    for e in 1..=opt.entries {
        let entry = EntryId(e);
        server.add_entry(entry);
        for _ in 0..rng.gen_range(0..=opt.max_comments) {
            let author = AUTHORS[rng.gen_range(0..AUTHORS.len())];
            let text = lipsum::lipsum_words(rng.gen_range(3..=COMMENT_MAX_WORDS));
            server.seed_comment(entry, author, &text);
        }
    }
    server
}

fn entry_card(server: &MockServer, entry: EntryId) -> anyhow::Result<String> {
    let title = escape_html(&lipsum::lipsum_title());
    let section = server.render_section(entry, 1)?;
    let section_id = section_id(entry);
    Ok(format!(
        r#"<div class="col"><div class="card mb-4">
  <img class="card-img-top {preview}" src="https://picsum.photos/seed/{entry}/400/300" {full_image}="https://picsum.photos/seed/{entry}/1600/1200" alt="{title}">
  <div class="card-body">
    <h5 class="card-title">{title}</h5>
    <input type="hidden" name="{DEFAULT_CSRF_FIELD}" value="{CSRF_TOKEN}">
    <div class="comment-section" id="{section_id}">
{section}    </div>
    <form class="{form}" method="post" action="/entries/{entry}/comment/">
      <input type="hidden" name="{DEFAULT_CSRF_FIELD}" value="{CSRF_TOKEN}">
      <textarea class="form-control form-control-sm" name="entry_{entry}-text" rows="2"></textarea>
      <button type="submit" class="btn btn-primary btn-sm mt-2">Comment</button>
    </form>
  </div>
</div></div>
"#,
        preview = dom::CLASS_PREVIEW,
        full_image = dom::ATTR_FULL_IMAGE,
        form = dom::CLASS_COMMENT_FORM,
    ))
}

fn main() -> anyhow::Result<()> {
    let opt = <Opt as structopt::StructOpt>::from_args();
    let server = gen_server(&opt);
    let config = Config {
        log_level: opt.log_level.clone(),
        ..Config::default()
    };

    println!("<!DOCTYPE html>");
    println!(r#"<html lang="en"><head><meta charset="utf-8"><title>Contest</title>"#);
    println!(r#"<link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css" rel="stylesheet">"#);
    println!(
        r#"<script type="application/json" id="contest-config">{}</script>"#,
        serde_json::to_string(&config)?
    );
    println!("</head><body><div class=\"container py-4\">");
    if opt.signed_in {
        println!(
            r#"<a id="{}" class="btn btn-success mb-4 {}" href="/contests/1/">Join the contest</a>"#,
            dom::ID_JOIN_BUTTON,
            dom::CLASS_JOIN_BUTTON,
        );
    }
    println!(r#"<div class="row row-cols-1 row-cols-md-2">"#);
    for entry in server.entries() {
        print!("{}", entry_card(&server, entry)?);
    }
    println!("</div></div>");
    println!(
        r#"<div class="modal fade" id="{}" tabindex="-1"><div class="modal-dialog modal-lg modal-dialog-centered"><div class="modal-content"><img id="{}" class="img-fluid" src="" alt=""></div></div></div>"#,
        dom::ID_IMAGE_MODAL,
        dom::ID_MODAL_IMAGE,
    );
    println!(r#"<script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/js/bootstrap.bundle.min.js"></script>"#);
    println!(
        r#"<script type="module">import init from "{}"; init();</script>"#,
        escape_html(&opt.script)
    );
    println!("</body></html>");
    Ok(())
}
