// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
This library fills placeholder elements in an SVG template with text,
raster images and other SVG documents.

A template is an ordinary SVG document authored visually in a vector
editor: the designer marks a `rect`, `tspan` or `flowPara` element with a
`template-id` attribute and a program later substitutes the dynamic
content without regenerating the layout.

Here is a simple overview of the structure:

- [`Template`]
    - [`Document`] - an arena that owns every node
        - nodes addressed by [`NodeId`] handles
            - tag name
            - [`Attributes`]
            - unique id
    - placeholder registries, one per [`PlaceholderKind`]

Substitutions rewrite the placeholder element in place:

- `tspan` placeholders receive text via [`Template::set_text`].
- `flowPara` placeholders receive text via [`Template::set_flowtext`].
- `rect` placeholders receive an image via [`Template::set_image`]
  (embedded as a base64 data URI or stored as a plain link), or another
  SVG document via [`Template::set_svg`], which is merged under the host
  `defs` element and referenced through a `use` element.

# Examples

```rust
use svgfill::{ImageSource, Template};

let mut tpl = Template::from_str(
"<svg xmlns='http://www.w3.org/2000/svg'>
    <text><tspan template-id='title'>placeholder</tspan></text>
    <rect template-id='logo' x='10' y='10' width='50' height='50'/>
</svg>").unwrap();

tpl.set_text("title", "Hello, world!").unwrap();
tpl.set_image("logo", ImageSource::Data {
    mimetype: "image/png",
    data: b"\x89PNG\r\n",
}).unwrap();

let svg = tpl.to_string();
assert!(svg.contains("data:image/png;base64,"));
```

[`Attributes`]: struct.Attributes.html
[`Document`]: struct.Document.html
[`NodeId`]: struct.NodeId.html
[`PlaceholderKind`]: enum.PlaceholderKind.html
[`Template`]: struct.Template.html
[`Template::set_text`]: struct.Template.html#method.set_text
[`Template::set_flowtext`]: struct.Template.html#method.set_flowtext
[`Template::set_image`]: struct.Template.html#method.set_image
[`Template::set_svg`]: struct.Template.html#method.set_svg
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use crate::attributes::{Attribute, Attributes};
pub use crate::dom::{Children, Descendants, Document, NodeId, NodeType};
pub use crate::error::{Error, ParserError};
pub use crate::parser::ParseOptions;
pub use crate::template::{ImageSource, PlaceholderKind, SvgSource, Template};
pub use crate::traits::{ToStringWithOptions, WriteBuffer};
pub use crate::writer::{Indent, WriteOptions};

mod attributes;
mod dom;
mod error;
mod parser;
mod template;
mod traits;
mod writer;
