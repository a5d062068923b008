//! An HTML page held as an html5ever DOM, with the handful of DOM operations the anchor
//! renderer performs: `getElementById`, `document.body`, `innerHTML`, `insertAdjacentHTML`
//! (`beforeend`) and `classList.add`.

use std::rc::Rc;

use html5ever::{
    Attribute, ParseOpts, QualName, local_name, namespace_url, ns, parse_document, parse_fragment,
    serialize::{SerializeOpts, TraversalScope},
    tendril::{StrTendril, TendrilSink as _},
    tree_builder::TreeBuilderOpts,
};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

use crate::error::{BoardError, BoardResult};

pub struct Page {
    dom: RcDom,
}

/// A node of the page. Handles stay valid across mutations.
#[derive(Clone)]
pub struct Element(Handle);

impl Element {
    pub fn is_document(&self) -> bool {
        matches!(self.0.data, NodeData::Document)
    }

    fn context_name(&self) -> QualName {
        match &self.0.data {
            NodeData::Element { name, .. } => name.clone(),
            _ => QualName::new(None, ns!(html), local_name!("body")),
        }
    }
}

fn parse_opts() -> ParseOpts {
    ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    }
}

impl Page {
    pub fn new(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), parse_opts()).one(html);
        Self { dom }
    }

    pub fn to_html(&self) -> BoardResult<String> {
        serialize_children(&self.dom.document)
    }

    /// First element in tree order whose `id` equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<Element> {
        find_first(&self.dom.document, &|node: &Handle| {
            let NodeData::Element { attrs, .. } = &node.data else {
                return false;
            };
            attrs
                .borrow()
                .iter()
                .any(|a| a.name.local == local_name!("id") && &*a.value == id)
        })
        .map(Element)
    }

    pub fn body(&self) -> Option<Element> {
        find_first(&self.dom.document, &|node: &Handle| {
            matches!(&node.data, NodeData::Element { name, .. } if name.local == local_name!("body"))
        })
        .map(Element)
    }

    /// The document node. Only reached for pages the parser gave no `<body>`.
    pub fn document(&self) -> Element {
        Element(self.dom.document.clone())
    }

    /// `#id`, else `<body>`, else the document.
    pub fn find_by_id_or_body(&self, id: &str) -> Element {
        self.find_by_id(id)
            .or_else(|| self.body())
            .unwrap_or_else(|| self.document())
    }

    pub fn inner_html(&self, el: &Element) -> BoardResult<String> {
        serialize_children(&el.0)
    }

    pub fn set_inner_html(&mut self, el: &Element, html: &str) {
        el.0.children.borrow_mut().clear();
        self.insert_before_end(el, html);
    }

    /// Parses `html` in the context of `el` and appends the result to its children.
    pub fn insert_before_end(&mut self, el: &Element, html: &str) {
        let fragment =
            parse_fragment(RcDom::default(), parse_opts(), el.context_name(), Vec::new()).one(html);

        // Fragment nodes are parsed under a synthetic <html> root.
        let Some(root) = fragment.document.children.borrow().first().cloned() else {
            return;
        };
        let nodes = std::mem::take(&mut *root.children.borrow_mut());
        for node in nodes {
            node.parent.set(Some(Rc::downgrade(&el.0)));
            el.0.children.borrow_mut().push(node);
        }
    }

    /// Adds `class` to the element's class list unless it is already there.
    /// Non-element nodes have no attributes and are left untouched.
    pub fn add_class(&mut self, el: &Element, class: &str) {
        let NodeData::Element { attrs, .. } = &el.0.data else {
            return;
        };
        let mut attrs = attrs.borrow_mut();

        match attrs
            .iter_mut()
            .find(|a| a.name.local == local_name!("class"))
        {
            Some(attr) => {
                if attr.value.split_ascii_whitespace().any(|c| c == class) {
                    return;
                }
                let joined = match attr.value.trim() {
                    "" => class.to_string(),
                    current => format!("{current} {class}"),
                };
                attr.value = StrTendril::from(joined);
            }
            None => attrs.push(Attribute {
                name: QualName::new(None, ns!(), local_name!("class")),
                value: StrTendril::from(class),
            }),
        }
    }
}

fn find_first(node: &Handle, pred: &dyn Fn(&Handle) -> bool) -> Option<Handle> {
    for child in node.children.borrow().iter() {
        if pred(child) {
            return Some(child.clone());
        }
        if let Some(found) = find_first(child, pred) {
            return Some(found);
        }
    }
    None
}

fn serialize_children(node: &Handle) -> BoardResult<String> {
    let mut out = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    html5ever::serialize::serialize(&mut out, &SerializableHandle::from(node.clone()), opts)
        .map_err(|e| BoardError::io(format!("serialize page: {e}")))?;
    String::from_utf8(out).map_err(|e| BoardError::io(format!("serialized page is not utf-8: {e}")))
}
