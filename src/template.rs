// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use base64::Engine;
use uuid::Uuid;

use crate::dom::{Document, NodeId, NodeType};
use crate::error::{Error, ParserError};
use crate::traits::{ToStringWithOptions, WriteBuffer};
use crate::writer::WriteOptions;

/// The attribute that marks an element as a placeholder.
const TEMPLATE_ID_ATTR: &str = "template-id";

/// Attributes that survive a placeholder rewrite.
const KEPT_ATTRIBUTES: &[&str] = &["x", "y", "width", "height", "style"];

/// List of supported placeholder kinds.
///
/// The kind is determined by the element's tag name once, during
/// template parsing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PlaceholderKind {
    /// A `rect` element. Accepts images and SVG fragments.
    Rect,
    /// A `tspan` element. Accepts text.
    Tspan,
    /// A `flowPara` element. Accepts flowed text.
    FlowPara,
}

impl PlaceholderKind {
    fn from_tag(tag: &str) -> Option<PlaceholderKind> {
        match tag {
            "rect" => Some(PlaceholderKind::Rect),
            "tspan" => Some(PlaceholderKind::Tspan),
            "flowPara" => Some(PlaceholderKind::FlowPara),
            _ => None,
        }
    }

    /// Returns the tag name of the placeholder kind.
    pub fn tag_name(self) -> &'static str {
        match self {
            PlaceholderKind::Rect => "rect",
            PlaceholderKind::Tspan => "tspan",
            PlaceholderKind::FlowPara => "flowPara",
        }
    }
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tag_name())
    }
}

/// A content source for [`Template::set_image`].
///
/// Embedding requires a media type; a plain link never takes one.
/// Invalid combinations are not representable.
///
/// [`Template::set_image`]: struct.Template.html#method.set_image
#[derive(Debug)]
pub enum ImageSource<'a> {
    /// Raw image content, embedded as a base64 data URI.
    Data {
        /// The media type, e.g. `image/png`.
        mimetype: &'a str,
        /// The image content.
        data: &'a [u8],
    },
    /// An image file, read fully and embedded as a base64 data URI.
    File {
        /// The media type, e.g. `image/png`.
        mimetype: &'a str,
        /// Path to the image file.
        path: &'a Path,
    },
    /// A path or URL, stored as is.
    ///
    /// Resolution is deferred to whatever consumes the output document.
    Link {
        /// The link target.
        href: &'a str,
    },
}

/// A content source for [`Template::set_svg`].
///
/// [`Template::set_svg`]: struct.Template.html#method.set_svg
#[derive(Debug)]
pub enum SvgSource<'a> {
    /// An SVG document content.
    Data(&'a str),
    /// An SVG file.
    File(&'a Path),
}

/// An SVG document with placeholder elements.
///
/// A template is an ordinary SVG document in which some elements carry
/// a `template-id` attribute. Such elements are collected during
/// parsing, the marker attribute is stripped, and the elements can
/// later be rewritten in place:
///
/// - `tspan` via [`set_text`]
/// - `flowPara` via [`set_flowtext`]
/// - `rect` via [`set_image`] or [`set_svg`]
///
/// Each placeholder accepts exactly one substitution. A second call
/// with the same id fails with [`Error::NoSuchPlaceholder`].
///
/// The document can be serialized at any time, including between
/// substitutions, via `to_string()` or [`to_string_with_opt`].
///
/// [`set_text`]: #method.set_text
/// [`set_flowtext`]: #method.set_flowtext
/// [`set_image`]: #method.set_image
/// [`set_svg`]: #method.set_svg
/// [`to_string_with_opt`]: ../trait.ToStringWithOptions.html#method.to_string_with_opt
/// [`Error::NoSuchPlaceholder`]: enum.Error.html#variant.NoSuchPlaceholder
pub struct Template {
    doc: Document,
    rects: HashMap<String, NodeId>,
    tspans: HashMap<String, NodeId>,
    flow_paras: HashMap<String, NodeId>,
    defs: NodeId,
}

impl Template {
    /// Constructs a new `Template` from the SVG text.
    pub fn from_str(text: &str) -> Result<Template, ParserError> {
        Template::with_document(Document::from_str(text)?)
    }

    /// Constructs a new `Template` from the SVG file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Template, ParserError> {
        let text = fs::read_to_string(path)?;
        Template::from_str(&text)
    }

    fn with_document(mut doc: Document) -> Result<Template, ParserError> {
        let mut rects = HashMap::new();
        let mut tspans = HashMap::new();
        let mut flow_paras = HashMap::new();

        let marked: Vec<NodeId> = doc.descendants(doc.root())
            .filter(|&n| doc.has_attribute(n, TEMPLATE_ID_ATTR))
            .collect();

        for node in marked {
            // The marker must not leak into the rendered output.
            let tid = match doc.attributes_mut(node).remove(TEMPLATE_ID_ATTR) {
                Some(attr) => attr.value,
                None => continue,
            };

            let kind = match PlaceholderKind::from_tag(doc.tag_name(node)) {
                Some(kind) => kind,
                None => {
                    return Err(ParserError::UnsupportedPlaceholder {
                        tag: doc.tag_name(node).to_string(),
                    });
                }
            };

            let registry = match kind {
                PlaceholderKind::Rect => &mut rects,
                PlaceholderKind::Tspan => &mut tspans,
                PlaceholderKind::FlowPara => &mut flow_paras,
            };

            if registry.insert(tid.clone(), node).is_some() {
                return Err(ParserError::DuplicatePlaceholder { id: tid });
            }
        }

        let defs = Template::resolve_defs(&mut doc);

        Ok(Template {
            doc,
            rects,
            tspans,
            flow_paras,
            defs,
        })
    }

    /// Reuses an existing `defs` element or creates a new one.
    ///
    /// Resolved once per document. A created `defs` becomes the first
    /// child of the `svg` element, so that the definitions stay
    /// separated from the drawable content.
    fn resolve_defs(doc: &mut Document) -> NodeId {
        // guaranteed by parse_svg
        let svg = doc.svg_element().unwrap();

        let existing = doc.children(svg)
            .find(|&n| doc.is_element(n) && doc.is_tag_name(n, "defs"));

        match existing {
            Some(defs) => defs,
            None => {
                let defs = doc.create_element("defs");
                doc.prepend(svg, defs);
                defs
            }
        }
    }

    /// Returns a reference to the underlying [`Document`].
    ///
    /// [`Document`]: struct.Document.html
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Replaces the text content of the `tspan` placeholder `id`.
    ///
    /// The text is stored verbatim; escaping is performed during
    /// serialization.
    pub fn set_text(&mut self, id: &str, text: &str) -> Result<(), Error> {
        let node = self.peek_placeholder(PlaceholderKind::Tspan, id)?;
        self.tspans.remove(id);
        self.replace_text_content(node, text);
        Ok(())
    }

    /// Replaces the text content of the `flowPara` placeholder `id`.
    ///
    /// Same contract as [`set_text`].
    ///
    /// [`set_text`]: #method.set_text
    pub fn set_flowtext(&mut self, id: &str, text: &str) -> Result<(), Error> {
        let node = self.peek_placeholder(PlaceholderKind::FlowPara, id)?;
        self.flow_paras.remove(id);
        self.replace_text_content(node, text);
        Ok(())
    }

    /// Rewrites the `rect` placeholder `id` into an `image` element.
    ///
    /// Embedding sources produce a `data:<mimetype>;base64,...`
    /// reference; a [`Link`] source is stored as is. The element keeps
    /// only the `x`, `y`, `width`, `height` and `style` attributes and
    /// gains `preserveAspectRatio="none"`.
    ///
    /// The tree is left untouched when the source file cannot be read.
    ///
    /// [`Link`]: enum.ImageSource.html#variant.Link
    pub fn set_image(&mut self, id: &str, source: ImageSource) -> Result<(), Error> {
        let node = self.peek_placeholder(PlaceholderKind::Rect, id)?;

        let href = match source {
            ImageSource::Data { mimetype, data } => encode_data_uri(mimetype, data),
            ImageSource::File { mimetype, path } => {
                let data = fs::read(path)?;
                encode_data_uri(mimetype, &data)
            }
            ImageSource::Link { href } => href.to_string(),
        };

        self.rects.remove(id);

        self.doc.set_tag_name(node, "image");
        self.retain_placeholder_attributes(node);
        self.doc.set_attribute(node, "preserveAspectRatio", "none");
        self.doc.set_attribute(node, "xlink:href", href);

        Ok(())
    }

    /// Rewrites the `rect` placeholder `id` into a `use` element
    /// referencing the merged-in SVG fragment.
    ///
    /// The fragment is parsed as an independent document, its root is
    /// copied under the host document's `defs` element and assigned a
    /// freshly generated unique id. Repeated calls with the same
    /// content always produce distinct ids. The placeholder keeps only
    /// the `x`, `y`, `width`, `height` and `style` attributes.
    ///
    /// The tree is left untouched when the fragment cannot be read or
    /// parsed.
    pub fn set_svg(&mut self, id: &str, source: SvgSource) -> Result<(), Error> {
        let node = self.peek_placeholder(PlaceholderKind::Rect, id)?;

        let fragment = match source {
            SvgSource::Data(text) => Document::from_str(text)?,
            SvgSource::File(path) => {
                let text = fs::read_to_string(path)?;
                Document::from_str(&text)?
            }
        };

        // guaranteed by parse_svg
        let fragment_root = fragment.svg_element().unwrap();
        let merged = self.doc.import_node(&fragment, fragment_root);

        let new_id = self.gen_unique_id();
        self.doc.set_id(merged, new_id.as_str());
        self.doc.append(self.defs, merged);

        self.rects.remove(id);

        self.doc.set_tag_name(node, "use");
        self.retain_placeholder_attributes(node);
        self.doc.set_attribute(node, "xlink:href", format!("#{}", new_id));

        Ok(())
    }

    fn peek_placeholder(&self, kind: PlaceholderKind, id: &str) -> Result<NodeId, Error> {
        let registry = match kind {
            PlaceholderKind::Rect => &self.rects,
            PlaceholderKind::Tspan => &self.tspans,
            PlaceholderKind::FlowPara => &self.flow_paras,
        };

        registry.get(id).copied()
            .ok_or_else(|| Error::NoSuchPlaceholder(kind, id.to_string()))
    }

    fn replace_text_content(&mut self, node: NodeId, text: &str) {
        let doc = &mut self.doc;

        let text_children: Vec<NodeId> = doc.children(node)
            .filter(|&n| doc.node_type(n) == NodeType::Text)
            .collect();
        for n in text_children {
            doc.remove_node(n);
        }

        if !text.is_empty() {
            let n = doc.create_node(NodeType::Text, text);
            doc.prepend(node, n);
        }
    }

    /// Drops everything outside the attribute whitelist, including the
    /// element's id.
    fn retain_placeholder_attributes(&mut self, node: NodeId) {
        self.doc.set_id(node, String::new());
        self.doc.attributes_mut(node)
            .retain(|attr| KEPT_ATTRIBUTES.contains(&attr.name.as_str()));
    }

    fn gen_unique_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.doc.has_element_with_id(&id) {
                return id;
            }
        }
    }
}

impl WriteBuffer for Template {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        self.doc.write_buf_opt(opt, buf);
    }
}

impl ToStringWithOptions for Template {}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.doc)
    }
}

fn encode_data_uri(mimetype: &str, data: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(data);
    format!("data:{};base64,{}", mimetype, encoded)
}
