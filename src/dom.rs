// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

use slab::Slab;

use crate::attributes::{Attribute, Attributes};
use crate::error::ParserError;
use crate::parser::{parse_svg, ParseOptions};
use crate::traits::{ToStringWithOptions, WriteBuffer};
use crate::writer::{self, WriteOptions};

/// List of supported node types.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum NodeType {
    /// The root node of the `Document`.
    ///
    /// Constructed with `Document`. Unavailable to the user.
    Root,
    /// An element node.
    ///
    /// Only an element can have attributes, an id and a tag name.
    Element,
    /// A declaration node.
    Declaration,
    /// A comment node.
    Comment,
    /// A text node.
    Text,
}

/// An opaque handle to a node inside a [`Document`].
///
/// Handles stay valid for the lifetime of the document, across any
/// amount of tree mutation, which is why registries store them instead
/// of references.
///
/// [`Document`]: struct.Document.html
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

struct NodeData {
    node_type: NodeType,
    tag_name: String,
    id: String,
    attributes: Attributes,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Container of nodes.
///
/// Structure:
///
/// - [`Document`]
///     - root node
///         - user defined node
///             - tag name
///             - [`Attributes`]
///             - unique id
///         - user defined node
///         - ...
///
/// The `Document` itself is an arena that owns every node. Nodes are
/// addressed by [`NodeId`] handles and can be created only through the
/// `Document`. Parsing and generating of the SVG data also done through it.
///
/// A node represents any kind of an XML node. It can be an element,
/// a comment, a text, etc. There are no different structs for each type.
///
/// The `id` attribute is stored as a separate value and not as part of
/// the [`Attributes`].
///
/// [`Attributes`]: struct.Attributes.html
/// [`Document`]: struct.Document.html
/// [`NodeId`]: struct.NodeId.html
pub struct Document {
    storage: Slab<NodeData>,
    root: NodeId,
}

impl Document {
    /// Constructs a new `Document`.
    pub fn new() -> Document {
        let mut storage = Slab::new();
        let root = NodeId(storage.insert(NodeData {
            node_type: NodeType::Root,
            tag_name: String::new(),
            id: String::new(),
            attributes: Attributes::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }));

        Document {
            storage,
            root,
        }
    }

    /// Constructs a new `Document` from the text using a default [`ParseOptions`].
    ///
    /// **Note:** only SVG elements and attributes will be parsed.
    ///
    /// [`ParseOptions`]: struct.ParseOptions.html
    pub fn from_str(text: &str) -> Result<Document, ParserError> {
        Document::from_str_with_opt(text, &ParseOptions::default())
    }

    /// Constructs a new `Document` from the text using a supplied [`ParseOptions`].
    ///
    /// **Note:** only SVG elements and attributes will be parsed.
    ///
    /// [`ParseOptions`]: struct.ParseOptions.html
    pub fn from_str_with_opt(text: &str, opt: &ParseOptions) -> Result<Document, ParserError> {
        parse_svg(text, opt)
    }

    fn get(&self, node: NodeId) -> &NodeData {
        &self.storage[node.0]
    }

    fn get_mut(&mut self, node: NodeId) -> &mut NodeData {
        &mut self.storage[node.0]
    }

    /// Constructs a new element node.
    ///
    /// The constructed node belongs to this document, but is not added
    /// to its tree structure.
    ///
    /// # Panics
    ///
    /// Panics if the tag name is empty.
    pub fn create_element<S: Into<String>>(&mut self, tag_name: S) -> NodeId {
        let tag_name = tag_name.into();
        if tag_name.is_empty() {
            panic!("supplied tag name is empty");
        }

        NodeId(self.storage.insert(NodeData {
            node_type: NodeType::Element,
            tag_name,
            id: String::new(),
            attributes: Attributes::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }))
    }

    /// Constructs a new node using the supplied [`NodeType`].
    ///
    /// The constructed node belongs to this document, but is not added
    /// to its tree structure.
    ///
    /// This method should be used for any non-element nodes.
    ///
    /// [`NodeType`]: enum.NodeType.html
    pub fn create_node<S: Into<String>>(&mut self, node_type: NodeType, text: S) -> NodeId {
        assert!(node_type != NodeType::Element && node_type != NodeType::Root);

        NodeId(self.storage.insert(NodeData {
            node_type,
            tag_name: String::new(),
            id: String::new(),
            attributes: Attributes::new(),
            text: text.into(),
            parent: None,
            children: Vec::new(),
        }))
    }

    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node's type.
    #[inline]
    pub fn node_type(&self, node: NodeId) -> NodeType {
        self.get(node).node_type
    }

    /// Returns `true` if the node is an element.
    #[inline]
    pub fn is_element(&self, node: NodeId) -> bool {
        self.get(node).node_type == NodeType::Element
    }

    /// Returns the element's tag name.
    ///
    /// Non-element nodes have an empty tag name.
    #[inline]
    pub fn tag_name(&self, node: NodeId) -> &str {
        &self.get(node).tag_name
    }

    /// Sets the element's tag name.
    ///
    /// # Panics
    ///
    /// Panics if the tag name is empty or the node is not an element.
    pub fn set_tag_name<S: Into<String>>(&mut self, node: NodeId, tag_name: S) {
        let tag_name = tag_name.into();
        if tag_name.is_empty() {
            panic!("supplied tag name is empty");
        }
        assert!(self.is_element(node));

        self.get_mut(node).tag_name = tag_name;
    }

    /// Returns `true` if the node has the supplied tag name.
    #[inline]
    pub fn is_tag_name(&self, node: NodeId, tag_name: &str) -> bool {
        self.get(node).tag_name == tag_name
    }

    /// Returns the node's `id` attribute value.
    #[inline]
    pub fn id(&self, node: NodeId) -> &str {
        &self.get(node).id
    }

    /// Returns `true` if the node has a non-empty id.
    #[inline]
    pub fn has_id(&self, node: NodeId) -> bool {
        !self.get(node).id.is_empty()
    }

    /// Sets the node's `id` attribute value.
    #[inline]
    pub fn set_id<S: Into<String>>(&mut self, node: NodeId, id: S) {
        self.get_mut(node).id = id.into();
    }

    /// Returns a reference to the node's attributes.
    #[inline]
    pub fn attributes(&self, node: NodeId) -> &Attributes {
        &self.get(node).attributes
    }

    /// Returns a mutable reference to the node's attributes.
    #[inline]
    pub fn attributes_mut(&mut self, node: NodeId) -> &mut Attributes {
        &mut self.get_mut(node).attributes
    }

    /// Returns `true` if the node has an attribute with such name.
    #[inline]
    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.get(node).attributes.contains(name)
    }

    /// Inserts a new attribute, replacing an existing one with the same name.
    pub fn set_attribute<N, V>(&mut self, node: NodeId, name: N, value: V)
        where N: Into<String>, V: Into<String>
    {
        self.attributes_mut(node).insert(Attribute::new(name, value));
    }

    /// Returns the node's text.
    ///
    /// Element nodes have an empty text; their text content is stored
    /// in child `Text` nodes.
    #[inline]
    pub fn text(&self, node: NodeId) -> &str {
        &self.get(node).text
    }

    /// Sets the node's text.
    pub fn set_text<S: Into<String>>(&mut self, node: NodeId, text: S) {
        debug_assert!(!self.is_element(node));
        self.get_mut(node).text = text.into();
    }

    /// Returns the node's parent, unless the node is the root or detached.
    #[inline]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).parent
    }

    /// Returns an iterator over the node's children.
    pub fn children(&self, node: NodeId) -> Children {
        Children {
            iter: self.get(node).children.iter(),
        }
    }

    /// Returns the node's first child, unless it has no children.
    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).children.first().copied()
    }

    /// Returns `true` if the node has children nodes.
    #[inline]
    pub fn has_children(&self, node: NodeId) -> bool {
        !self.get(node).children.is_empty()
    }

    /// Returns an iterator over the node and all its descendants,
    /// in document order.
    pub fn descendants(&self, node: NodeId) -> Descendants {
        Descendants {
            doc: self,
            stack: vec![node],
        }
    }

    /// Appends a new child to the node, after existing children.
    ///
    /// # Panics
    ///
    /// Panics if the node and `new_child` is the same node.
    pub fn append(&mut self, node: NodeId, new_child: NodeId) {
        assert!(node != new_child, "a node cannot be appended to itself");

        self.detach(new_child);
        self.get_mut(new_child).parent = Some(node);
        self.get_mut(node).children.push(new_child);
    }

    /// Prepends a new child to the node, before existing children.
    ///
    /// # Panics
    ///
    /// Panics if the node and `new_child` is the same node.
    pub fn prepend(&mut self, node: NodeId, new_child: NodeId) {
        assert!(node != new_child, "a node cannot be prepended to itself");

        self.detach(new_child);
        self.get_mut(new_child).parent = Some(node);
        self.get_mut(node).children.insert(0, new_child);
    }

    /// Detaches the node from its parent. Children are not affected.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.get_mut(node).parent.take() {
            let children = &mut self.get_mut(parent).children;
            if let Some(idx) = children.iter().position(|&n| n == node) {
                children.remove(idx);
            }
        }
    }

    /// Removes the node and all its children from the tree.
    ///
    /// The nodes are detached from the document and their handles
    /// become invalid.
    ///
    /// # Panics
    ///
    /// Panics if the root node is about to be removed.
    pub fn remove_node(&mut self, node: NodeId) {
        assert!(node != self.root, "the root node cannot be removed");

        self.detach(node);

        let subtree: Vec<NodeId> = self.descendants(node).collect();
        for n in subtree {
            self.storage.remove(n.0);
        }
    }

    /// Returns a deep copy of a node from another document.
    ///
    /// The tag name, id, attributes, text and all children are copied.
    /// The copy belongs to this document, but is not added to its tree
    /// structure.
    pub fn import_node(&mut self, src: &Document, node: NodeId) -> NodeId {
        let new_node = match src.node_type(node) {
            NodeType::Element => {
                let n = self.create_element(src.tag_name(node));
                self.set_id(n, src.id(node));
                for attr in src.attributes(node).iter() {
                    self.attributes_mut(n).insert(attr.clone());
                }
                n
            }
            node_type => self.create_node(node_type, src.text(node)),
        };

        for child in src.children(node) {
            let new_child = self.import_node(src, child);
            self.append(new_node, new_child);
        }

        new_node
    }

    /// Returns the first child with the `svg` tag name of the root node.
    pub fn svg_element(&self) -> Option<NodeId> {
        self.children(self.root)
            .find(|&n| self.is_element(n) && self.is_tag_name(n, "svg"))
    }

    /// Returns `true` if any element in the document has such id.
    pub fn has_element_with_id(&self, id: &str) -> bool {
        self.descendants(self.root).any(|n| self.id(n) == id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

impl WriteBuffer for Document {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        writer::write_dom(self, opt, buf);
    }
}

impl ToStringWithOptions for Document {}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_string_with_opt(&WriteOptions::default()))
    }
}

/// An iterator over the children of a node.
pub struct Children<'a> {
    iter: ::std::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().copied()
    }
}

/// An iterator over a node and its descendants, in document order.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;

        // Push children in reverse so the first child is popped next.
        let children = &self.doc.get(node).children;
        self.stack.extend(children.iter().rev());

        Some(node)
    }
}
