//! ObjectScript language scanning toolchain.
//!
//! This crate implements the context-sensitive half of an ObjectScript lexer: the token
//! decisions that a context-free grammar cannot make on its own, such as telling the
//! argumentless form of a command apart from the argumentful one, or matching the
//! user-chosen markers that quote an embedded SQL region. A host parser drives the
//! scanner one decision at a time; everything the scanner declines falls back to the
//! host's own token matching.
//!

#[macro_use]
extern crate static_assertions;

pub mod toolchain;
