//! Lexer, parser, and AST for **Vitrine page documents** (`.vpage`).
//!
//! A page document describes the content of a one-page site: its sections,
//! their items, and the reveal parameters each section uses. This crate only
//! knows the generic tree shape; `vitrine-ui` gives the nodes meaning.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ast`] | `PageDocument`, `Node`, `Prop`, `Value` |
//! | [`error`] | `ParseError`, `ErrorKind` |
//! | [`lexer`] | `Lexer`, `Token` |
//! | [`parser`] | `parse_str` entry point |
//!
//! # Quick start
//!
//! ```rust
//! use vitrine_markup::parse_str;
//!
//! let src = r#"
//!     Page "Portfolio" {
//!         Section "skills" {
//!             threshold: 0.2
//!             Item "Cloud & DevOps" { Skill "AWS" { level: advanced } }
//!         }
//!     }
//! "#;
//!
//! let doc = parse_str(src).unwrap();
//! assert_eq!(doc.root.kind, "Page");
//! assert_eq!(doc.root.children[0].prop_f32("threshold"), Some(0.2));
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{Node, PageDocument, Prop, Value};
pub use error::{ErrorKind, ParseError};
pub use parser::parse_str;
