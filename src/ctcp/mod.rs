//! CTCP payload decoration.
//!
//! A PRIVMSG or NOTICE whose text is wrapped in 0x01 bytes carries a CTCP
//! payload. Dispatch wants those as their own commands, so [`decorate`]
//! rewrites such a line into a derived pseudo-command line: [`ACTION`] for
//! emotes, [`CTCP`] for other requests, [`CTCP_REPLY`] for replies arriving
//! via NOTICE. Derived lines are the only place
//! [`Line::destination`](crate::parse::line::Line) gets filled.

use crate::parse::line::Line;

/// Derived command for a `\x01ACTION ...\x01` emote.
pub const ACTION: &str = "ACTION";
/// Derived command for any other CTCP request arriving via PRIVMSG.
pub const CTCP: &str = "CTCP";
/// Derived command for a CTCP reply arriving via NOTICE.
pub const CTCP_REPLY: &str = "CTCPREPLY";

/// Rewrite a CTCP-carrying PRIVMSG or NOTICE into its derived
/// pseudo-command line; `None` for anything else.
///
/// The derived line keeps the source, raw text, timestamp, and identity
/// handle of the input, and `destination` is set to the original message
/// target so dispatch still knows where the payload was sent.
pub fn decorate(line: &Line) -> Option<Line> {
    let is_privmsg = line.command.eq_ignore_ascii_case("PRIVMSG");
    let is_notice = line.command.eq_ignore_ascii_case("NOTICE");
    if !is_privmsg && !is_notice {
        return None;
    }
    // Need at least a target and the message text
    if line.args.len() < 2 {
        return None;
    }

    let target = &line.args[0];
    let text = line.args.last()?;
    let ctcp = text.strip_prefix('\x01')?.strip_suffix('\x01')?;
    if ctcp.is_empty() {
        return None;
    }

    let (verb, payload) = match ctcp.split_once(' ') {
        Some((verb, payload)) => (verb, Some(payload)),
        None => (ctcp, None),
    };

    let (command, args) = if is_privmsg && verb == ACTION {
        (ACTION, vec![payload.unwrap_or("").to_string()])
    } else {
        let command = if is_privmsg { CTCP } else { CTCP_REPLY };
        let mut args = vec![verb.to_string()];
        if let Some(payload) = payload {
            args.push(payload.to_string());
        }
        (command, args)
    };

    tracing::debug!("derived {} from {}: {:?}", command, line.command, ctcp);

    let mut derived = line.clone();
    derived.command = command.to_string();
    derived.args = args;
    derived.destination = target.clone();
    Some(derived)
}
