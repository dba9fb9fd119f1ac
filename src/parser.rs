// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use log::warn;

use crate::dom::{Document, NodeId, NodeType};
use crate::error::ParserError;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Options that defines SVG parsing.
#[derive(Debug)]
pub struct ParseOptions {
    /// Keep comment nodes.
    ///
    /// Default: true
    pub parse_comments: bool,

    /// Keep the XML declaration.
    ///
    /// Default: true
    pub parse_declarations: bool,
}

impl Default for ParseOptions {
    fn default() -> ParseOptions {
        ParseOptions {
            parse_comments: true,
            parse_declarations: true,
        }
    }
}

/// Parses an SVG text into a [`Document`].
///
/// Elements and attributes from namespaces other than SVG, xlink and xml
/// are skipped with a warning. The `id` attribute is stored separately
/// from the attribute list.
///
/// [`Document`]: struct.Document.html
pub fn parse_svg(text: &str, opt: &ParseOptions) -> Result<Document, ParserError> {
    if text.trim().is_empty() {
        return Err(ParserError::EmptyDocument);
    }

    let rx_doc = roxmltree::Document::parse(text)?;

    let mut doc = Document::new();
    let root = doc.root();

    // roxmltree does not surface the XML declaration,
    // so it is recovered from the document prologue.
    if opt.parse_declarations {
        if let Some(decl) = parse_declaration(text) {
            let n = doc.create_node(NodeType::Declaration, decl);
            doc.append(root, n);
        }
    }

    for child in rx_doc.root().children() {
        process_node(&mut doc, root, child, opt);
    }

    if !doc.has_children(root) {
        return Err(ParserError::EmptyDocument);
    }

    // The first element must be an 'svg'.
    match doc.children(root).find(|&n| doc.is_element(n)) {
        Some(n) if doc.is_tag_name(n, "svg") => {}
        _ => return Err(ParserError::NoSvgElement),
    }

    Ok(doc)
}

fn process_node(
    doc: &mut Document,
    parent: NodeId,
    rx_node: roxmltree::Node,
    opt: &ParseOptions,
) {
    if rx_node.is_element() {
        let tag = rx_node.tag_name();
        if let Some(ns) = tag.namespace() {
            if ns != SVG_NS {
                warn!("Skipping the foreign element '{}' from the '{}' namespace.",
                      tag.name(), ns);
                return;
            }
        }

        let elem = doc.create_element(tag.name());
        doc.append(parent, elem);

        for attr in rx_node.attributes() {
            process_attribute(doc, elem, &attr);
        }

        for child in rx_node.children() {
            process_node(doc, elem, child, opt);
        }
    } else if rx_node.is_text() {
        let text = rx_node.text().unwrap_or_default();

        // Whitespaces are important only inside text content elements.
        if text.trim().is_empty() && !is_text_content_tag(doc.tag_name(parent)) {
            return;
        }

        let n = doc.create_node(NodeType::Text, text);
        doc.append(parent, n);
    } else if rx_node.is_comment() {
        if opt.parse_comments {
            let n = doc.create_node(NodeType::Comment, rx_node.text().unwrap_or_default());
            doc.append(parent, n);
        }
    }
}

fn process_attribute(doc: &mut Document, node: NodeId, attr: &roxmltree::Attribute) {
    let name = match attr.namespace() {
        None => {
            if attr.name() == "id" {
                doc.set_id(node, attr.value());
                return;
            }

            attr.name().to_string()
        }
        Some(ns) if ns == SVG_NS => attr.name().to_string(),
        Some(ns) if ns == XLINK_NS => format!("xlink:{}", attr.name()),
        Some(ns) if ns == XML_NS => format!("xml:{}", attr.name()),
        Some(ns) => {
            warn!("Skipping the foreign attribute '{}' from the '{}' namespace.",
                  attr.name(), ns);
            return;
        }
    };

    doc.set_attribute(node, name, attr.value());
}

fn parse_declaration(text: &str) -> Option<String> {
    let s = text.trim_start();
    if !s.starts_with("<?xml") {
        return None;
    }

    // Reject processing instructions like '<?xml-stylesheet?>'.
    if !s[5..].starts_with(|c: char| c.is_whitespace()) {
        return None;
    }

    let end = s.find("?>")?;
    Some(s[5..end].trim().to_string())
}

fn is_text_content_tag(tag: &str) -> bool {
    matches!(tag, "text" | "tspan" | "tref" | "textPath"
                | "flowRoot" | "flowPara" | "flowSpan")
}
