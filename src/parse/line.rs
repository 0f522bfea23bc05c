//! Protocol line parsing.
//!
//! Splits one raw IRC line into sender prefix, command, and arguments. The
//! parser is total: any input, however malformed, comes back as a [`Line`] —
//! a line with no recoverable structure simply carries an empty `command`.
//! A client has to keep reading whatever the peer sends, so there is no
//! error path and no panic path here.

use crate::identity::IdentityHandle;
use crate::parse::user::{parse_user, User};
use chrono::{DateTime, Local};

/// One parsed protocol line.
///
/// `args` keeps wire order; when the line carried a ` :`-introduced trailing
/// argument it is always the final element, embedded spaces and colons
/// intact. Check `command.is_empty()` to tell an unparseable line from a
/// parsed one.
#[derive(Debug, Clone)]
pub struct Line {
    /// Sender parsed from the leading `:` prefix; default when the line had
    /// none.
    pub source: User,
    /// The command token as received. Empty when the line was too malformed
    /// to contain one, in which case `args` is empty and `source` is the
    /// default [`User`] too.
    pub command: String,
    /// Arguments in wire order, trailing argument last.
    pub args: Vec<String>,
    /// The unmodified input line.
    pub raw: String,
    /// When the line was parsed.
    pub timestamp: DateTime<Local>,
    /// Target of the original message, filled only on derived pseudo-command
    /// lines such as ACTION and CTCP; empty on lines straight off the wire.
    pub destination: String,
    me: Option<IdentityHandle>,
}

impl Line {
    /// Attach the shared self-identity read by
    /// [`source_is_me`](Self::source_is_me). The connection that parsed the
    /// line calls this before handing it to dispatch.
    pub fn with_identity(mut self, me: IdentityHandle) -> Self {
        self.me = Some(me);
        self
    }

    /// The attached self-identity handle, if any.
    pub fn identity(&self) -> Option<&IdentityHandle> {
        self.me.as_ref()
    }

    /// Whether the sender is the client itself.
    ///
    /// Compares `source.nick` against the identity cell's value at call
    /// time, so a rename between parsing and this call is honored. False
    /// when no identity was attached.
    pub fn source_is_me(&self) -> bool {
        match &self.me {
            Some(me) => self.source.nick == me.current().nick,
            None => false,
        }
    }
}

/// Parse one raw protocol line, without its terminating CR/LF.
///
/// Never fails and never panics. The grammar is the IRC wire format:
/// space-delimited tokens, an optional leading `:`-prefixed sender, and an
/// optional ` :`-introduced trailing argument taken verbatim to the end of
/// the line.
pub fn parse_line(input: &str) -> Line {
    let mut line = Line {
        source: User::default(),
        command: String::new(),
        args: Vec::new(),
        raw: input.to_string(),
        timestamp: Local::now(),
        destination: String::new(),
        me: None,
    };

    // A line may not be empty or open with a space.
    if input.is_empty() || input.starts_with(' ') {
        tracing::trace!("discarding malformed line: {:?}", input);
        return line;
    }

    // Everything after the first " :" is one trailing argument, kept
    // verbatim. Only the head gets tokenized.
    let (head, trailing) = match input.split_once(" :") {
        Some((head, trailing)) => (head, Some(trailing)),
        None => (input, None),
    };

    // Runs of spaces collapse; empty tokens never reach the caller.
    let mut words = head.split(' ').filter(|w| !w.is_empty());

    let first = match words.next() {
        Some(word) => word,
        None => {
            tracing::trace!("no tokens ahead of the trailing argument: {:?}", input);
            return line;
        }
    };

    // A leading `:` token is the sender prefix. The parsed sender is only
    // committed once a command token exists; an aborted line stays inert.
    let (source, command) = match first.strip_prefix(':') {
        Some(prefix) => match words.next() {
            Some(word) => (parse_user(prefix), word),
            None => {
                tracing::trace!("prefix without a command: {:?}", input);
                return line;
            }
        },
        None => (User::default(), first),
    };

    line.source = source;
    line.command = command.to_string();
    line.args = words.map(str::to_string).collect();
    if let Some(trailing) = trailing {
        line.args.push(trailing.to_string());
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_line() {
        let line = parse_line(":alice!a@b CMD arg1 arg2 :trailing text");
        assert_eq!(line.command, "CMD");
        assert_eq!(line.args, vec!["arg1", "arg2", "trailing text"]);
        assert_eq!(line.source.nick, "alice");
        assert_eq!(line.source.user, "a");
        assert_eq!(line.source.host, "b");
        assert_eq!(line.raw, ":alice!a@b CMD arg1 arg2 :trailing text");
        assert_eq!(line.destination, "");
    }

    #[test]
    fn test_no_prefix() {
        let line = parse_line("PING :server1");
        assert_eq!(line.command, "PING");
        assert_eq!(line.args, vec!["server1"]);
        assert_eq!(line.source.nick, "");
    }

    #[test]
    fn test_command_only() {
        let line = parse_line("LIST");
        assert_eq!(line.command, "LIST");
        assert!(line.args.is_empty());
    }

    #[test]
    fn test_args_without_trailing() {
        let line = parse_line("MODE #chan +o alice");
        assert_eq!(line.command, "MODE");
        assert_eq!(line.args, vec!["#chan", "+o", "alice"]);
    }

    #[test]
    fn test_empty_line() {
        let line = parse_line("");
        assert_eq!(line.command, "");
        assert!(line.args.is_empty());
        assert_eq!(line.raw, "");
    }

    #[test]
    fn test_leading_space_rejected() {
        let line = parse_line(" PRIVMSG #chan :hi");
        assert_eq!(line.command, "");
        assert!(line.args.is_empty());
        assert_eq!(line.raw, " PRIVMSG #chan :hi");
    }

    #[test]
    fn test_spaces_only_rejected() {
        let line = parse_line("   ");
        assert_eq!(line.command, "");
        assert!(line.args.is_empty());
    }

    #[test]
    fn test_collapsed_spaces() {
        let line = parse_line("CMD   a   b");
        assert_eq!(line.args, vec!["a", "b"]);
    }

    #[test]
    fn test_trailing_keeps_colons() {
        let line = parse_line("CMD :foo:bar baz");
        assert_eq!(line.args, vec!["foo:bar baz"]);
    }

    #[test]
    fn test_empty_trailing_argument() {
        let line = parse_line("CMD :");
        assert_eq!(line.args, vec![""]);
    }

    #[test]
    fn test_first_separator_wins() {
        let line = parse_line("CMD a :b :c");
        assert_eq!(line.args, vec!["a", "b :c"]);
    }

    #[test]
    fn test_trailing_after_run_of_spaces() {
        let line = parse_line("CMD  :x");
        assert_eq!(line.command, "CMD");
        assert_eq!(line.args, vec!["x"]);
    }

    #[test]
    fn test_server_prefix() {
        let line = parse_line(":irc.example.net 001 alice :Welcome to IRC");
        assert_eq!(line.source.nick, "");
        assert_eq!(line.source.raw, "irc.example.net");
        assert_eq!(line.command, "001");
        assert_eq!(line.args, vec!["alice", "Welcome to IRC"]);
    }

    #[test]
    fn test_prefix_only_line_is_inert() {
        let line = parse_line(":alice!a@b");
        assert_eq!(line.command, "");
        assert!(line.args.is_empty());
        assert_eq!(line.source, User::default());
    }

    #[test]
    fn test_prefix_with_only_trailing_is_inert() {
        let line = parse_line(":alice!a@b :text");
        assert_eq!(line.command, "");
        assert!(line.args.is_empty());
        assert_eq!(line.source, User::default());
    }

    #[test]
    fn test_bare_colon_prefix() {
        let line = parse_line(": CMD a");
        assert_eq!(line.command, "CMD");
        assert_eq!(line.args, vec!["a"]);
        assert_eq!(line.source, User::default());
    }

    #[test]
    fn test_timestamp_is_capture_time() {
        let before = Local::now();
        let line = parse_line("PING");
        let after = Local::now();
        assert!(line.timestamp >= before);
        assert!(line.timestamp <= after);
    }

    #[test]
    fn test_source_is_me_tracks_current_identity() {
        let me = Identity::new(parse_user("alice!ai@example.com"));
        let line = parse_line(":alice!ai@example.com PRIVMSG #chan :hi").with_identity(me.clone());
        assert!(line.source_is_me());

        // Rename after parsing: the already-parsed line notices
        me.set_nick("alice_away");
        assert!(!line.source_is_me());

        let line = parse_line(":alice_away!ai@example.com NICK :alice").with_identity(me.clone());
        assert!(line.source_is_me());
    }

    #[test]
    fn test_source_is_me_for_other_sender() {
        let me = Identity::new(parse_user("alice!ai@example.com"));
        let line = parse_line(":bob!b@elsewhere PRIVMSG alice :hi").with_identity(me);
        assert!(!line.source_is_me());
    }

    #[test]
    fn test_source_is_me_without_identity() {
        assert!(!parse_line(":alice!a@b PRIVMSG #chan :hi").source_is_me());
        assert!(!parse_line("PING :server1").source_is_me());
    }

    #[test]
    fn test_identity_accessor() {
        let me = Identity::new(parse_user("alice!ai@example.com"));
        let line = parse_line("PING").with_identity(me);
        assert!(line.identity().is_some());
        assert!(parse_line("PING").identity().is_none());
    }
}
