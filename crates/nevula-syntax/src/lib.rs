//! # nevula-syntax
//!
//! A single-pass parser for a small inline markup language, producing a tree
//! of entities whose spans point back into the source text.
//!
//! ## The Markup
//!
//! ```text
//! **bold**   //italic//   *italic*   __underline__   ~~strikethrough~~
//! ||spoiler||   [#f80]colored to end of line[#]
//! ``code``   ```lang
//! fenced code```   [type: custom expression]
//! > blockquote line
//! \* escaped   https://links   <https://links>   ✨   :emoji_name:
//! ```
//!
//! ## Architecture Overview
//!
//! The pipeline has three stages, each a pure function of its input:
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Entity Tree → add_text_spans → Filled Tree
//!               (regex)          (marker stack)           (gap filler)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! One combined regular expression finds every markup lexeme. Plain text is
//! never tokenized, only the markup positions matter.
//!
//! ```text
//! "a **b** c" → [BOLD@2..4, BOLD@5..7]
//! ```
//!
//! ### 2. Parser ([`parse_markup`])
//!
//! The parser walks the tokens once with a stack of open markers. A closing
//! delimiter turns its marker into an entity and adopts every entity already
//! completed inside it as children. Code, codeblocks and custom expressions
//! jump straight to their closer so their content is never parsed.
//!
//! Malformed markup is never an error. Anything that does not pair up stays
//! in the text.
//!
//! ### 3. Filler ([`add_text_spans`])
//!
//! The parser records only markup. The filler adds a text leaf for every gap
//! so that each entity's children cover its content exactly.
//!
//! ## Spans
//!
//! All offsets are byte offsets into the source `&str`, always on `char`
//! boundaries. Every entity has an `outer_span` including its delimiters and
//! an `inner_span` for its content. After filling, writing out each entity's
//! delimiters around its children, and each leaf's outer slice, reproduces
//! the source exactly.
//!
//! ## Module Structure
//!
//! ```text
//! nevula-syntax/
//! ├── lib.rs       # This file - public API and snapshot tests
//! ├── lexer.rs     # Token table and the combined regex
//! ├── parser/
//! │   ├── mod.rs   # Marker stack resolver, parse_markup()
//! │   └── marker.rs# Open delimiter records
//! ├── fill.rs      # add_text_spans()
//! ├── entity.rs    # Entity and EntityKind
//! ├── span.rs      # Span and contains_span()
//! ├── color.rs     # Color values for color markers
//! └── options.rs   # Extension switches
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use nevula_syntax::{add_text_spans, parse_markup, EntityKind};
//!
//! let text = "**hello** world";
//! let tree = add_text_spans(parse_markup(text));
//!
//! let bold = &tree.children[0];
//! assert_eq!(bold.kind, EntityKind::Bold);
//! assert_eq!(bold.inner_span.slice(text), "hello");
//! assert_eq!(tree.children[1].outer_span.slice(text), " world");
//! ```

pub mod color;
pub mod entity;
pub mod fill;
pub mod lexer;
pub mod options;
mod parser;
pub mod span;

pub use color::{Color, ColorError};
pub use entity::{Entity, EntityKind};
pub use fill::add_text_spans;
pub use options::ParseOptions;
pub use parser::{parse_markup, parse_markup_with};
pub use span::{Span, contains_span};
