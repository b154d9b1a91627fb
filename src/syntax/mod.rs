//! Source text, tokens, and the parenthesized-list tree.
//!
//! This is the collaborator side of the checker: it turns raw C# bytes into
//! the small tree shape the rules consume. It is not a C# grammar — it
//! recognizes exactly the constructs that carry a parameter or argument
//! list, and degrades to "no node" on anything it cannot match.

pub mod lexer;
pub mod source;
pub mod tree;
