//! Reads comment lists and pagination links out of server markup

use html5ever::{parse_document, tendril::TendrilSink, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use contest_client::api::{dom, render, EntryId};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ParsedComment {
    pub id: String,
    pub author: String,
    pub created_at: String,
    pub text: String,
    pub edit_url: Option<String>,
    pub delete_url: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum ParsedNode {
    Comment(ParsedComment),
    Placeholder,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ParsedLink {
    pub href: String,
    pub entry_id: Option<EntryId>,
}

fn parse(html: &str) -> Handle {
    parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .expect("reading html from memory")
        .document
}

fn tag(handle: &Handle) -> Option<String> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

fn attr(handle: &Handle, attr_name: &str) -> Option<String> {
    match &handle.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref() == attr_name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

fn has_class(handle: &Handle, class: &str) -> bool {
    attr(handle, "class").map_or(false, |c| c.split_whitespace().any(|c| c == class))
}

fn text(handle: &Handle) -> String {
    fn collect(handle: &Handle, res: &mut String) {
        if let NodeData::Text { contents } = &handle.data {
            res.push_str(&contents.borrow());
        }
        for child in handle.children.borrow().iter() {
            collect(child, res);
        }
    }
    let mut res = String::new();
    collect(handle, &mut res);
    res
}

/// First element under `handle`, in document order, matching `pred`
fn find(handle: &Handle, pred: &dyn Fn(&Handle) -> bool) -> Option<Handle> {
    handle.children.borrow().iter().find_map(|child| {
        if tag(child).is_some() && pred(child) {
            Some(child.clone())
        } else {
            find(child, pred)
        }
    })
}

fn class_text(handle: &Handle, class: &str) -> String {
    find(handle, &|h| has_class(h, class))
        .map(|h| text(&h).trim().to_string())
        .unwrap_or_default()
}

fn attr_below(handle: &Handle, attr_name: &str) -> Option<String> {
    attr(handle, attr_name).or_else(|| {
        find(handle, &|h| attr(h, attr_name).is_some()).and_then(|h| attr(&h, attr_name))
    })
}

fn parse_comment(handle: &Handle, id: String) -> ParsedComment {
    ParsedComment {
        id,
        author: class_text(handle, "comment-author"),
        created_at: class_text(handle, "comment-date"),
        text: class_text(handle, dom::CLASS_COMMENT_TEXT),
        edit_url: attr_below(handle, dom::ATTR_EDIT_URL),
        delete_url: attr_below(handle, dom::ATTR_DELETE_URL),
    }
}

fn collect_nodes(handle: &Handle, res: &mut Vec<ParsedNode>) {
    for child in handle.children.borrow().iter() {
        if tag(child).is_none() {
            continue;
        }
        if let Some(id) = attr(child, dom::ATTR_COMMENT_ID) {
            res.push(ParsedNode::Comment(parse_comment(child, id)));
        } else if render::is_placeholder(&attr(child, "class").unwrap_or_default(), &text(child))
        {
            res.push(ParsedNode::Placeholder);
        } else {
            collect_nodes(child, res);
        }
    }
}

/// Comment nodes and placeholders, in document order
pub(crate) fn parse_nodes(html: &str) -> Vec<ParsedNode> {
    let mut res = Vec::new();
    collect_nodes(&parse(html), &mut res);
    res
}

pub(crate) fn parse_links(html: &str) -> Vec<ParsedLink> {
    fn collect(handle: &Handle, res: &mut Vec<ParsedLink>) {
        for child in handle.children.borrow().iter() {
            if tag(child).as_deref() == Some("a") && has_class(child, "page-link") {
                if let Some(href) = attr(child, "href") {
                    res.push(ParsedLink {
                        href,
                        entry_id: attr(child, dom::ATTR_ENTRY_ID)
                            .and_then(|e| e.parse().ok())
                            .map(EntryId),
                    });
                }
            }
            collect(child, res);
        }
    }
    let mut res = Vec::new();
    collect(&parse(html), &mut res);
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use contest_client::api::{Comment, CommentId};

    #[test]
    fn reads_back_rendered_comments() {
        let c = Comment {
            id: CommentId(String::from("7")),
            author: String::from("Alice & Bob"),
            text: String::from("<b>Great</b> shot!"),
            created_at: String::from("2 mins ago"),
            edit_url: String::from("/comments/7/edit"),
            delete_url: String::from("/comments/7/delete"),
        };
        let html = format!("{}{}", render::placeholder(), render::comment_item(&c));
        let nodes = parse_nodes(&html);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0], ParsedNode::Placeholder);
        assert_eq!(
            nodes[1],
            ParsedNode::Comment(ParsedComment {
                id: String::from("7"),
                author: String::from("Alice & Bob"),
                created_at: String::from("2 mins ago"),
                text: String::from("<b>Great</b> shot!"),
                edit_url: Some(String::from("/comments/7/edit")),
                delete_url: Some(String::from("/comments/7/delete")),
            })
        );
    }

    #[test]
    fn reads_server_placeholder_without_dedicated_class() {
        let nodes = parse_nodes(
            r#"<div class="list-group comment-list">
                <div class="list-group-item text-muted">No comments yet.</div>
            </div>"#,
        );
        assert_eq!(nodes, vec![ParsedNode::Placeholder]);
    }

    #[test]
    fn reads_items_whatever_the_attribute_order() {
        let nodes = parse_nodes(
            r#"<div class="list-group comment-list">
                <div data-comment-id="12" class="list-group-item">
                    <strong class="comment-author"> Carol </strong>
                    <small class="comment-date text-muted">yesterday</small>
                    <button data-delete-url="/comments/12/delete" class="delete-comment-btn">Delete</button>
                    <button data-edit-url="/comments/12/edit" class="edit-comment-btn">Edit</button>
                    <p class="comment-text mb-0">Nice &amp; sharp</p>
                </div>
            </div>"#,
        );
        assert_eq!(
            nodes,
            vec![ParsedNode::Comment(ParsedComment {
                id: String::from("12"),
                author: String::from("Carol"),
                created_at: String::from("yesterday"),
                text: String::from("Nice & sharp"),
                edit_url: Some(String::from("/comments/12/edit")),
                delete_url: Some(String::from("/comments/12/delete")),
            })]
        );
    }

    #[test]
    fn reads_links() {
        let links = parse_links(
            r#"<nav class="comment-pagination"><a href="http://testserver/?comments_4=2" class="page-link" data-entry-id="4">2</a><span class="page-link">3</span></nav>"#,
        );
        assert_eq!(
            links,
            vec![ParsedLink {
                href: String::from("http://testserver/?comments_4=2"),
                entry_id: Some(EntryId(4)),
            }]
        );
    }
}
