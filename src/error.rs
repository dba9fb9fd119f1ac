// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::error;
use std::fmt;
use std::io;

use crate::template::PlaceholderKind;

/// Template loading and scanning errors.
#[derive(Debug)]
pub enum ParserError {
    /// Parsed document doesn't have any nodes.
    EmptyDocument,

    /// Parsed document must have an `svg` element.
    NoSvgElement,

    /// A `template-id` attribute was found on an element that cannot
    /// act as a placeholder.
    UnsupportedPlaceholder {
        /// Tag name of the offending element.
        tag: String,
    },

    /// Two elements of the same kind share a `template-id` value.
    DuplicatePlaceholder {
        /// The duplicated identifier.
        id: String,
    },

    /// A `roxmltree` error.
    RoXmlError(roxmltree::Error),

    /// Failed to read the template file.
    IoError(io::Error),
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParserError::EmptyDocument => {
                write!(f, "the document does not have any nodes")
            }
            ParserError::NoSvgElement => {
                write!(f, "the document does not have an SVG element")
            }
            ParserError::UnsupportedPlaceholder { ref tag } => {
                write!(f, "only 'rect', 'tspan' and 'flowPara' elements can be placeholders, \
                           found '{}' instead", tag)
            }
            ParserError::DuplicatePlaceholder { ref id } => {
                write!(f, "the placeholder id '{}' is used more than once", id)
            }
            ParserError::RoXmlError(ref e) => {
                write!(f, "{}", e)
            }
            ParserError::IoError(ref e) => {
                write!(f, "{}", e)
            }
        }
    }
}

impl error::Error for ParserError {}

impl From<roxmltree::Error> for ParserError {
    fn from(value: roxmltree::Error) -> Self {
        ParserError::RoXmlError(value)
    }
}

impl From<io::Error> for ParserError {
    fn from(value: io::Error) -> Self {
        ParserError::IoError(value)
    }
}

/// Substitution errors.
#[derive(Debug)]
pub enum Error {
    /// The target registry has no pending placeholder with such id.
    ///
    /// Returned both for unknown ids and for placeholders that were
    /// already substituted.
    NoSuchPlaceholder(PlaceholderKind, String),

    /// The supplied SVG fragment could not be parsed.
    InvalidFragment(ParserError),

    /// Failed to read an image or fragment file.
    IoError(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::NoSuchPlaceholder(kind, ref id) => {
                write!(f, "no pending '{}' placeholder with id '{}'", kind, id)
            }
            Error::InvalidFragment(ref e) => {
                write!(f, "invalid SVG fragment: {}", e)
            }
            Error::IoError(ref e) => {
                write!(f, "{}", e)
            }
        }
    }
}

impl error::Error for Error {}

impl From<ParserError> for Error {
    fn from(value: ParserError) -> Self {
        Error::InvalidFragment(value)
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::IoError(value)
    }
}
