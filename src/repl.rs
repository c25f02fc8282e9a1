//! Line-oriented terminal loops.
//!
//! Each program prints a prompt, reads one line, hands it to its session,
//! prints the result, and repeats. The loop ends on the exit sentinel
//! (`exit`, any case) or end of input. The next line is not read until the
//! current request has completed.
//!
//! The loops are generic over async reader/writer so tests can drive them
//! with in-memory buffers. Input bytes that are not valid UTF-8 are decoded
//! lossily rather than ending the session.

use anyhow::Result;
use std::borrow::Cow;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use product_assistant_core::session::{
    format_search_results, ChatSession, RetrievalSession, SearchSession,
};

pub const CHAT_PROMPT: &str = "Please ask question (type \"exit\" to quit)> ";
pub const RAG_PROMPT: &str = "Enter your question about products (or type \"exit\" to quit): ";
pub const SEARCH_PROMPT: &str = "Enter your search query (or type \"exit\" to quit): ";

/// True for the exit sentinel, compared case-insensitively and ignoring
/// surrounding whitespace.
pub fn is_exit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("exit")
}

/// Prompted line input paired with an output sink.
pub struct Repl<R, W> {
    input: R,
    output: W,
    buf: Vec<u8>,
}

impl<R, W> Repl<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            buf: Vec::new(),
        }
    }

    /// Print `prompt` and read the next line.
    ///
    /// Returns `None` on the exit sentinel or end of input.
    pub async fn next_input(&mut self, prompt: &str) -> Result<Option<String>> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await?;

        match self.read_line().await? {
            Some(line) if is_exit(&line) => {
                debug!("exit sentinel received");
                Ok(None)
            }
            Some(line) => Ok(Some(line)),
            None => {
                // keep the shell prompt on its own line
                self.say("").await?;
                Ok(None)
            }
        }
    }

    /// Read one line without its terminator. `None` at end of input.
    async fn read_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        if self.input.read_until(b'\n', &mut self.buf).await? == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        let line = match String::from_utf8_lossy(&self.buf) {
            Cow::Borrowed(valid) => valid.to_string(),
            Cow::Owned(replaced) => {
                debug!("input line was not valid UTF-8, decoded lossily");
                replaced
            }
        };
        Ok(Some(line))
    }

    /// Print `text` followed by a newline.
    pub async fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

pub async fn run_chat<R, W>(session: &mut ChatSession, repl: &mut Repl<R, W>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    while let Some(question) = repl.next_input(CHAT_PROMPT).await? {
        let answer = session.respond(&question).await?;
        repl.say(&answer).await?;
    }
    Ok(())
}

pub async fn run_retrieval<R, W>(
    session: &mut RetrievalSession,
    repl: &mut Repl<R, W>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    while let Some(query) = repl.next_input(RAG_PROMPT).await? {
        let reply = session.answer(&query).await?;
        repl.say(&reply.render()).await?;
    }
    Ok(())
}

pub async fn run_search<R, W>(session: &SearchSession, repl: &mut Repl<R, W>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    while let Some(query) = repl.next_input(SEARCH_PROMPT).await? {
        let products = session.search(&query).await?;
        repl.say(&format_search_results(&products)).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_sentinel() {
        for s in ["exit", "EXIT", "ExIt", "  exit  ", "exit\r"] {
            assert!(is_exit(s), "{:?}", s);
        }
        for s in ["", "exit now", "quit", "exi", "e x i t"] {
            assert!(!is_exit(s), "{:?}", s);
        }
    }

    #[tokio::test]
    async fn test_next_input_reads_lines_until_exit() {
        let input: &[u8] = b"first\nsecond\nExit\nnever read\n";
        let mut repl = Repl::new(input, Vec::new());
        assert_eq!(repl.next_input("> ").await.unwrap(), Some("first".to_string()));
        assert_eq!(repl.next_input("> ").await.unwrap(), Some("second".to_string()));
        assert_eq!(repl.next_input("> ").await.unwrap(), None);
        let out = String::from_utf8(repl.into_output()).unwrap();
        assert_eq!(out, "> > > ");
    }

    #[tokio::test]
    async fn test_next_input_eof_ends_loop() {
        let input: &[u8] = b"";
        let mut repl = Repl::new(input, Vec::new());
        assert_eq!(repl.next_input("> ").await.unwrap(), None);
        assert_eq!(String::from_utf8(repl.into_output()).unwrap(), "> \n");
    }

    #[tokio::test]
    async fn test_line_terminators_stripped() {
        let input: &[u8] = b"crlf\r\nlast without newline";
        let mut repl = Repl::new(input, Vec::new());
        assert_eq!(repl.next_input("> ").await.unwrap(), Some("crlf".to_string()));
        assert_eq!(
            repl.next_input("> ").await.unwrap(),
            Some("last without newline".to_string())
        );
        assert_eq!(repl.next_input("> ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_utf8_decoded_lossily() {
        let input: &[u8] = b"caf\xe9\nnext\n";
        let mut repl = Repl::new(input, Vec::new());
        assert_eq!(
            repl.next_input("> ").await.unwrap(),
            Some("caf\u{FFFD}".to_string())
        );
        assert_eq!(repl.next_input("> ").await.unwrap(), Some("next".to_string()));
    }

    #[tokio::test]
    async fn test_empty_line_is_input() {
        let input: &[u8] = b"\n";
        let mut repl = Repl::new(input, Vec::new());
        assert_eq!(repl.next_input("> ").await.unwrap(), Some(String::new()));
    }
}
