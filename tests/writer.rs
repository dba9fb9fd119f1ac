// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use] extern crate pretty_assertions;

use svgfill::{
    Document,
    Indent,
    NodeType,
    ToStringWithOptions,
    WriteOptions,
};

#[test]
fn empty_doc_1() {
    assert_eq!(Document::new().to_string(), String::new());
}

#[test]
fn single_node_1() {
    let mut doc = Document::new();
    let n = doc.create_element("svg");

    let root = doc.root();
    doc.append(root, n);

    assert_eq!(doc.to_string(), "<svg xmlns=\"http://www.w3.org/2000/svg\"/>\n");
}

#[test]
fn child_node_1() {
    let mut doc = Document::new();
    let svg = doc.create_element("svg");
    let defs = doc.create_element("defs");

    let root = doc.root();
    doc.append(root, svg);
    doc.append(svg, defs);

    assert_eq!(doc.to_string(),
"<svg xmlns=\"http://www.w3.org/2000/svg\">
    <defs/>
</svg>
");
}

#[test]
fn child_nodes_1() {
    let mut doc = Document::new();
    let svg = doc.create_element("svg");
    let root = doc.root();
    doc.append(root, svg);

    let mut parent = svg;
    for n in 1..5 {
        let r = doc.create_element("rect");
        doc.set_id(r, n.to_string());
        doc.append(parent, r);

        parent = r;
    }

    assert_eq!(doc.to_string(),
"<svg xmlns=\"http://www.w3.org/2000/svg\">
    <rect id=\"1\">
        <rect id=\"2\">
            <rect id=\"3\">
                <rect id=\"4\"/>
            </rect>
        </rect>
    </rect>
</svg>
");
}

#[test]
fn attributes_order_1() {
    // 'id' is written first, other attributes keep the insertion order
    let mut doc = Document::new();
    let svg = doc.create_element("svg");
    let rect = doc.create_element("rect");

    let root = doc.root();
    doc.append(root, svg);
    doc.append(svg, rect);

    doc.set_attribute(rect, "width", "10");
    doc.set_attribute(rect, "fill", "red");
    doc.set_id(rect, "rect1");

    assert_eq!(doc.to_string(),
"<svg xmlns=\"http://www.w3.org/2000/svg\">
    <rect id=\"rect1\" width=\"10\" fill=\"red\"/>
</svg>
");
}

#[test]
fn links_1() {
    // 'xmlns:xlink' is declared when any element links something
    let mut doc = Document::new();
    let svg = doc.create_element("svg");
    let use_elem = doc.create_element("use");

    let root = doc.root();
    doc.append(root, svg);
    doc.append(svg, use_elem);

    doc.set_attribute(use_elem, "xlink:href", "#rect1");

    assert_eq!(doc.to_string(),
"<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\">
    <use xlink:href=\"#rect1\"/>
</svg>
");
}

#[test]
fn text_escape_1() {
    let mut doc = Document::new();
    let svg = doc.create_element("svg");
    let text = doc.create_element("text");
    let t = doc.create_node(NodeType::Text, "a < b & c > d");

    let root = doc.root();
    doc.append(root, svg);
    doc.append(svg, text);
    doc.append(text, t);

    assert_eq!(doc.to_string(),
"<svg xmlns=\"http://www.w3.org/2000/svg\">
    <text>a &lt; b &amp; c &gt; d</text>
</svg>
");
}

#[test]
fn attribute_escape_1() {
    let mut doc = Document::new();
    let svg = doc.create_element("svg");
    let root = doc.root();
    doc.append(root, svg);

    doc.set_attribute(svg, "font-family", "\"Droid Sans\" & <friends>");

    assert_eq!(doc.to_string(),
        "<svg xmlns=\"http://www.w3.org/2000/svg\" \
         font-family=\"&quot;Droid Sans&quot; &amp; &lt;friends>\"/>\n");
}

#[test]
fn attribute_escape_2() {
    let mut doc = Document::new();
    let svg = doc.create_element("svg");
    let root = doc.root();
    doc.append(root, svg);

    doc.set_attribute(svg, "font-family", "Sans' & \"Serif\"");

    let mut opt = WriteOptions::default();
    opt.use_single_quote = true;

    assert_eq!(doc.to_string_with_opt(&opt),
        "<svg xmlns='http://www.w3.org/2000/svg' \
         font-family='Sans&apos; &amp; \"Serif\"'/>\n");
}

#[test]
fn indent_1() {
    let doc = Document::from_str("<svg><g><rect/></g></svg>").unwrap();

    let mut opt = WriteOptions::default();
    opt.indent = Indent::None;

    assert_eq!(doc.to_string_with_opt(&opt),
        "<svg xmlns=\"http://www.w3.org/2000/svg\"><g><rect/></g></svg>");
}

#[test]
fn indent_2() {
    let doc = Document::from_str("<svg><g><rect/></g></svg>").unwrap();

    let mut opt = WriteOptions::default();
    opt.indent = Indent::Spaces(2);

    assert_eq!(doc.to_string_with_opt(&opt),
"<svg xmlns=\"http://www.w3.org/2000/svg\">
  <g>
    <rect/>
  </g>
</svg>
");
}

#[test]
fn indent_3() {
    let doc = Document::from_str("<svg><g><rect/></g></svg>").unwrap();

    let mut opt = WriteOptions::default();
    opt.indent = Indent::Tabs;

    assert_eq!(doc.to_string_with_opt(&opt),
"<svg xmlns=\"http://www.w3.org/2000/svg\">
\t<g>
\t\t<rect/>
\t</g>
</svg>
");
}

#[test]
fn import_node_1() {
    let src = Document::from_str(
        "<svg id='frag'><rect width='1' fill='red'/></svg>").unwrap();

    let mut doc = Document::new();
    let svg = doc.create_element("svg");
    let root = doc.root();
    doc.append(root, svg);

    let src_root = src.svg_element().unwrap();
    let imported = doc.import_node(&src, src_root);
    doc.append(svg, imported);

    assert_eq!(doc.to_string(),
"<svg xmlns=\"http://www.w3.org/2000/svg\">
    <svg id=\"frag\">
        <rect width=\"1\" fill=\"red\"/>
    </svg>
</svg>
");
}

#[test]
fn remove_node_1() {
    let mut doc = Document::from_str("<svg><g><rect/></g><text>a</text></svg>").unwrap();

    let svg = doc.svg_element().unwrap();
    let g = doc.first_child(svg).unwrap();
    doc.remove_node(g);

    assert_eq!(doc.to_string(),
"<svg xmlns=\"http://www.w3.org/2000/svg\">
    <text>a</text>
</svg>
");
}
