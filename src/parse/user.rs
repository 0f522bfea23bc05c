//! Sender mask parsing.
//!
//! The prefix of an IRC line names its origin as a `nick!user@host` mask,
//! but servers put bare hostnames in the same position, so parsing is
//! best-effort: input that does not match the mask grammar end to end is
//! kept verbatim in [`User::raw`] with the identifying fields left empty.

use std::fmt;

/// A protocol sender parsed from a `nick!user@host` mask.
///
/// When the mask matched, `nick` and `host` are populated (`user` too unless
/// the `!user` segment was absent). When it did not match — a bare server
/// hostname, a leading digit, no `@` — only `raw` is populated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// Nickname; empty when the mask did not match.
    pub nick: String,
    /// Username; empty when absent or when the mask did not match.
    pub user: String,
    /// Hostname; empty when the mask did not match.
    pub host: String,
    /// The original unparsed text.
    pub raw: String,
}

impl User {
    /// Human-readable sender label: the nickname when known, else the raw text.
    pub fn display(&self) -> &str {
        if self.nick.is_empty() {
            &self.raw
        } else {
            &self.nick
        }
    }

    /// Identification string minus the nickname: `user@host`, or just `host`
    /// when no username was seen, or empty for an unparsed mask.
    pub fn ident(&self) -> String {
        if !self.user.is_empty() && !self.host.is_empty() {
            format!("{}@{}", self.user, self.host)
        } else if !self.host.is_empty() {
            self.host.clone()
        } else {
            String::new()
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// Parse a sender mask into a [`User`].
///
/// Accepts any input and never fails: if the whole string matches
/// `nick!user@host` (the `!user` part optional), the identifying fields are
/// filled from it; otherwise they stay empty and only `raw` records what was
/// received.
pub fn parse_user(raw: &str) -> User {
    let mut parsed = User {
        raw: raw.to_string(),
        ..User::default()
    };

    if let Some((nick, user, host)) = split_mask(raw) {
        parsed.nick = nick.to_string();
        parsed.user = user.to_string();
        parsed.host = host.to_string();
    } else {
        tracing::trace!("sender prefix is not a user mask: {:?}", raw);
    }

    parsed
}

/// Leading nick character: a letter or an IRC special from the ASCII ranges
/// 0x5B-0x60 and 0x7B-0x7D.
fn is_nick_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '['..='`' | '{'..='}')
}

/// Continuation nick character: the leading set plus digits and `-`.
fn is_nick_char(c: char) -> bool {
    is_nick_start(c) || c.is_ascii_digit() || c == '-'
}

/// Split a mask into `(nick, user, host)` slices, or `None` when the string
/// does not match the grammar from start to end. No substring matching.
fn split_mask(raw: &str) -> Option<(&str, &str, &str)> {
    let mut indices = raw.char_indices();
    match indices.next() {
        Some((_, c)) if is_nick_start(c) => {}
        _ => return None,
    }

    let mut nick_end = None;
    for (idx, c) in indices {
        if !is_nick_char(c) {
            nick_end = Some(idx);
            break;
        }
    }
    // Running off the end means the nick was never terminated by `!` or `@`.
    let nick_end = nick_end?;
    // A nick is the leading character plus at least one more.
    if nick_end < 2 {
        return None;
    }

    let (nick, rest) = raw.split_at(nick_end);
    if let Some(after_bang) = rest.strip_prefix('!') {
        // The username runs to the first `@`; the host keeps the remainder
        // even if it contains further `@` characters.
        let (user, host) = after_bang.split_once('@')?;
        if user.is_empty() || host.is_empty() {
            return None;
        }
        Some((nick, user, host))
    } else if let Some(host) = rest.strip_prefix('@') {
        if host.is_empty() {
            return None;
        }
        Some((nick, "", host))
    } else {
        None
    }
}
