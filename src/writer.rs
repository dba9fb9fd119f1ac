// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::dom::{Document, NodeId, NodeType};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// XML nodes indention.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Indent {
    /// Disable indention and new lines.
    None,
    /// Indent with spaces. Up to 255 spaces.
    Spaces(u8),
    /// Indent with tabs.
    Tabs,
}

/// Options that defines SVG writing.
#[derive(Debug)]
pub struct WriteOptions {
    /// Use single quote marks instead of double quote.
    ///
    /// # Examples
    ///
    /// Before:
    ///
    /// ```text
    /// <rect fill="red"/>
    /// ```
    ///
    /// After:
    ///
    /// ```text
    /// <rect fill='red'/>
    /// ```
    ///
    /// Default: disabled
    pub use_single_quote: bool,

    /// Set XML nodes indention.
    ///
    /// # Examples
    ///
    /// `Indent::None`
    ///
    /// Before:
    ///
    /// ```text
    /// <svg>
    ///     <rect fill="red"/>
    /// </svg>
    /// ```
    ///
    /// After:
    ///
    /// ```text
    /// <svg><rect fill="red"/></svg>
    /// ```
    ///
    /// Default: 4 spaces
    pub indent: Indent,
}

impl Default for WriteOptions {
    fn default() -> WriteOptions {
        WriteOptions {
            use_single_quote: false,
            indent: Indent::Spaces(4),
        }
    }
}

struct Depth {
    value: u32,
    block: Vec<u8>,
}

impl Depth {
    fn new(indent: Indent) -> Depth {
        Depth {
            value: 0,
            block: Depth::gen_indent(indent),
        }
    }

    fn gen_indent(indent: Indent) -> Vec<u8> {
        match indent {
            Indent::None => Vec::new(),
            Indent::Spaces(n) => vec![b' '; n as usize],
            Indent::Tabs => vec![b'\t'],
        }
    }

    fn write_indent(&self, out: &mut Vec<u8>) {
        for _ in 0..self.value {
            out.extend_from_slice(&self.block);
        }
    }
}

/// Writes a document into the buffer.
pub(crate) fn write_dom(doc: &Document, opt: &WriteOptions, out: &mut Vec<u8>) {
    let mut depth = Depth::new(opt.indent);

    for child in doc.children(doc.root()) {
        write_node(doc, child, opt, &mut depth, out);
    }
}

fn write_node(
    doc: &Document,
    node: NodeId,
    opt: &WriteOptions,
    depth: &mut Depth,
    out: &mut Vec<u8>,
) {
    match doc.node_type(node) {
        NodeType::Root => {}
        NodeType::Element => {
            depth.write_indent(out);

            // Elements with a text content are written as is,
            // otherwise the substituted text would gain indention.
            if has_text_content(doc, node) {
                write_element_start(doc, node, opt, out);
                for child in doc.children(node) {
                    write_node_inline(doc, child, opt, out);
                }
                write_element_end(doc, node, out);
                write_newline(opt.indent, out);
                return;
            }

            write_element_start(doc, node, opt, out);

            if doc.has_children(node) {
                write_newline(opt.indent, out);

                depth.value += 1;
                for child in doc.children(node) {
                    write_node(doc, child, opt, depth, out);
                }
                depth.value -= 1;

                depth.write_indent(out);
            }

            write_element_end(doc, node, out);
            write_newline(opt.indent, out);
        }
        NodeType::Declaration => {
            depth.write_indent(out);
            out.extend_from_slice(b"<?xml ");
            out.extend_from_slice(doc.text(node).as_bytes());
            out.extend_from_slice(b"?>");
            write_newline(opt.indent, out);
        }
        NodeType::Comment => {
            depth.write_indent(out);
            out.extend_from_slice(b"<!--");
            out.extend_from_slice(doc.text(node).as_bytes());
            out.extend_from_slice(b"-->");
            write_newline(opt.indent, out);
        }
        NodeType::Text => {
            depth.write_indent(out);
            write_escaped_text(doc.text(node), out);
            write_newline(opt.indent, out);
        }
    }
}

fn write_node_inline(doc: &Document, node: NodeId, opt: &WriteOptions, out: &mut Vec<u8>) {
    match doc.node_type(node) {
        NodeType::Element => {
            write_element_start(doc, node, opt, out);
            for child in doc.children(node) {
                write_node_inline(doc, child, opt, out);
            }
            write_element_end(doc, node, out);
        }
        NodeType::Text => {
            write_escaped_text(doc.text(node), out);
        }
        NodeType::Comment => {
            out.extend_from_slice(b"<!--");
            out.extend_from_slice(doc.text(node).as_bytes());
            out.extend_from_slice(b"-->");
        }
        _ => {}
    }
}

fn write_element_start(doc: &Document, node: NodeId, opt: &WriteOptions, out: &mut Vec<u8>) {
    out.push(b'<');
    out.extend_from_slice(doc.tag_name(node).as_bytes());
    write_attributes(doc, node, opt, out);

    if doc.has_children(node) {
        out.push(b'>');
    }
}

fn write_element_end(doc: &Document, node: NodeId, out: &mut Vec<u8>) {
    if doc.has_children(node) {
        out.extend_from_slice(b"</");
        out.extend_from_slice(doc.tag_name(node).as_bytes());
        out.push(b'>');
    } else {
        out.extend_from_slice(b"/>");
    }
}

/// Writes attributes.
///
/// Order:
/// - namespace declarations on the root `svg` element
/// - `id`
/// - attributes in the insertion order
fn write_attributes(doc: &Document, node: NodeId, opt: &WriteOptions, out: &mut Vec<u8>) {
    // Write root SVG node attributes.
    if doc.is_tag_name(node, "svg") && doc.parent(node) == Some(doc.root()) {
        write_attribute("xmlns", SVG_NS, opt, out);

        let xlink_needed = doc.descendants(node).any(|n| doc.has_attribute(n, "xlink:href"));
        if xlink_needed {
            write_attribute("xmlns:xlink", XLINK_NS, opt, out);
        }
    }

    if doc.has_id(node) {
        write_attribute("id", doc.id(node), opt, out);
    }

    for attr in doc.attributes(node).iter() {
        write_attribute(&attr.name, &attr.value, opt, out);
    }
}

fn write_attribute(name: &str, value: &str, opt: &WriteOptions, out: &mut Vec<u8>) {
    out.push(b' ');
    out.extend_from_slice(name.as_bytes());
    out.push(b'=');
    write_quote(opt, out);
    write_escaped_attr(value, opt, out);
    write_quote(opt, out);
}

fn write_quote(opt: &WriteOptions, out: &mut Vec<u8>) {
    if opt.use_single_quote {
        out.push(b'\'');
    } else {
        out.push(b'"');
    }
}

fn write_newline(indent: Indent, out: &mut Vec<u8>) {
    if indent != Indent::None {
        out.push(b'\n');
    }
}

fn has_text_content(doc: &Document, node: NodeId) -> bool {
    doc.children(node).any(|n| doc.node_type(n) == NodeType::Text)
}

fn write_escaped_text(text: &str, out: &mut Vec<u8>) {
    for c in text.bytes() {
        match c {
            b'&' => out.extend_from_slice(b"&amp;"),
            b'<' => out.extend_from_slice(b"&lt;"),
            b'>' => out.extend_from_slice(b"&gt;"),
            _ => out.push(c),
        }
    }
}

fn write_escaped_attr(value: &str, opt: &WriteOptions, out: &mut Vec<u8>) {
    for c in value.bytes() {
        match c {
            b'&' => out.extend_from_slice(b"&amp;"),
            b'<' => out.extend_from_slice(b"&lt;"),
            b'"' if !opt.use_single_quote => out.extend_from_slice(b"&quot;"),
            b'\'' if opt.use_single_quote => out.extend_from_slice(b"&apos;"),
            _ => out.push(c),
        }
    }
}
