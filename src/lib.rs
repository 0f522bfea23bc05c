//! Forgiving parser for the IRC wire format.
//!
//! Turns raw protocol lines into structured values: [`parse_line`] splits a
//! line into source, command, and arguments, and [`parse_user`] decomposes a
//! `nick!user@host` sender mask. Both are total functions — garbage input
//! degrades to values with empty identifying fields instead of an error,
//! because a client must never die on whatever a server sends.
//!
//! ```
//! use crabwire::{parse_line, parse_user, Identity};
//!
//! let me = Identity::new(parse_user("alice!ai@example.com"));
//! let line = parse_line(":bob!b@h PRIVMSG alice :hello").with_identity(me);
//! assert_eq!(line.command, "PRIVMSG");
//! assert_eq!(line.args, vec!["alice", "hello"]);
//! assert!(!line.source_is_me());
//! ```

pub mod ctcp;
pub mod identity;
pub mod parse;

pub use identity::{Identity, IdentityHandle};
pub use parse::line::{parse_line, Line};
pub use parse::user::{parse_user, User};
