//! Line-oriented terminal rendering of the turn log.
//!
//! Streaming updates are printed as deltas while the new text extends
//! what is already on screen. When it does not, the turn is reprinted on
//! a fresh line.

use std::io::Write;

use tracing::warn;
use uplink_common::{ChatRole, Citation, TurnHandle};

use crate::surface::RenderSurface;
use crate::transcript::Transcript;

pub struct TerminalSurface<W: Write> {
    out: W,
    transcript: Transcript,
    /// Text of the live turn as it currently appears on screen.
    printed: String,
    /// The cursor sits after the live turn's text.
    line_open: bool,
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            transcript: Transcript::new(),
            printed: String::new(),
            line_open: false,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
        {
            warn!("terminal write failed: {e}");
        }
    }

    /// Close the live line before printing anything else. The responder
    /// label is on screen even when no text has arrived yet.
    fn end_live_line(&mut self) {
        if self.line_open {
            self.emit("\n");
            self.line_open = false;
        }
        self.printed.clear();
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn append_turn(&mut self, role: ChatRole, text: &str) -> TurnHandle {
        self.end_live_line();
        let handle = self.transcript.append_turn(role, text);
        match role {
            ChatRole::User => self.emit(&format!("[{}] {text}\n", role.label())),
            ChatRole::Assistant => {
                self.emit(&format!("[{}] ", role.label()));
                self.emit(text);
                self.printed = text.to_string();
                self.line_open = true;
            }
        }
        handle
    }

    fn update_text(&mut self, handle: TurnHandle, text: &str) {
        if self.transcript.live() != Some(handle) {
            self.transcript.update_text(handle, text);
            return;
        }
        self.transcript.update_text(handle, text);

        match text.strip_prefix(self.printed.as_str()) {
            Some(delta) => {
                let delta = delta.to_string();
                self.emit(&delta);
            }
            None => {
                self.emit(&format!("\n[{}] {text}", ChatRole::Assistant.label()));
            }
        }
        self.printed = text.to_string();
    }

    fn append_citations(&mut self, handle: TurnHandle, citations: &[Citation]) {
        if self.transcript.live() != Some(handle) {
            self.transcript.append_citations(handle, citations);
            return;
        }
        self.end_live_line();
        self.transcript.append_citations(handle, citations);

        let mut block = String::from("  SOURCES\n");
        for (i, citation) in citations.iter().enumerate() {
            block.push_str(&format!(
                "  [{}] {} <{}>\n",
                i + 1,
                citation.display_label(),
                citation.uri
            ));
        }
        self.emit(&block);
    }

    fn finish(&mut self, handle: TurnHandle) {
        if self.transcript.live() == Some(handle) {
            self.end_live_line();
        }
        self.transcript.finish(handle);
    }

    fn append_notice(&mut self, text: &str) {
        self.end_live_line();
        self.transcript.append_notice(text);
        self.emit(&format!("!! {text}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(surface: &TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.writer().clone()).unwrap()
    }

    #[test]
    fn user_turn_prints_full_line() {
        let mut s = TerminalSurface::new(Vec::new());
        s.append_turn(ChatRole::User, "status?");
        assert_eq!(output(&s), "[OPERATOR] status?\n");
    }

    #[test]
    fn streaming_updates_print_deltas() {
        let mut s = TerminalSurface::new(Vec::new());
        let h = s.append_turn(ChatRole::Assistant, "");
        s.update_text(h, "Sys");
        s.update_text(h, "System online.");
        s.append_notice("done");
        assert_eq!(output(&s), "[UPLINK] System online.\n!! done\n");
        assert_eq!(s.transcript().turn(h).unwrap().text, "System online.");
    }

    #[test]
    fn non_extending_update_reprints_turn() {
        let mut s = TerminalSurface::new(Vec::new());
        let h = s.append_turn(ChatRole::Assistant, "");
        s.update_text(h, "Alpha");
        s.update_text(h, "Beta");
        assert_eq!(output(&s), "[UPLINK] Alpha\n[UPLINK] Beta");
    }

    #[test]
    fn citations_render_after_text() {
        let mut s = TerminalSurface::new(Vec::new());
        let h = s.append_turn(ChatRole::Assistant, "");
        s.update_text(h, "Coverage confirmed.");
        s.append_citations(h, &[Citation::new("DoD Report", "https://example.mil/dod")]);
        assert_eq!(
            output(&s),
            "[UPLINK] Coverage confirmed.\n  SOURCES\n  [1] DoD Report <https://example.mil/dod>\n"
        );
    }

    #[test]
    fn finish_ends_the_reply_line() {
        let mut s = TerminalSurface::new(Vec::new());
        let h = s.append_turn(ChatRole::Assistant, "");
        s.update_text(h, "System online.");
        s.finish(h);
        s.finish(h);
        assert_eq!(output(&s), "[UPLINK] System online.\n");
        assert_eq!(s.transcript().live(), None);

        s.append_notice("next");
        assert_eq!(output(&s), "[UPLINK] System online.\n!! next\n");
    }

    #[test]
    fn empty_reply_still_closes_its_label() {
        let mut s = TerminalSurface::new(Vec::new());
        let h = s.append_turn(ChatRole::Assistant, "");
        s.finish(h);
        assert_eq!(output(&s), "[UPLINK] \n");
    }

    #[test]
    fn consecutive_notices_do_not_add_blank_lines() {
        let mut s = TerminalSurface::new(Vec::new());
        let h = s.append_turn(ChatRole::Assistant, "");
        s.update_text(h, "part");
        s.append_notice("one");
        s.append_notice("two");
        assert_eq!(output(&s), "[UPLINK] part\n!! one\n!! two\n");
    }

    #[test]
    fn notice_after_partial_stream_keeps_partial_text() {
        let mut s = TerminalSurface::new(Vec::new());
        s.append_turn(ChatRole::User, "x");
        let h = s.append_turn(ChatRole::Assistant, "");
        s.update_text(h, "partial");
        s.append_notice("TRANSMISSION FAILED");
        assert_eq!(
            output(&s),
            "[OPERATOR] x\n[UPLINK] partial\n!! TRANSMISSION FAILED\n"
        );
        assert_eq!(s.transcript().turn(h).unwrap().text, "partial");
    }
}
