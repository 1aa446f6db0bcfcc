//! Line-oriented terminal front end.
//!
//! Each input line becomes one or more controller events: plain text is typed
//! into the search box and submitted, `:`-prefixed lines drive the cards and
//! the modal. Requests run concurrently with input, so a line typed while a
//! search is in flight reaches the controller and is rejected there. Detail
//! requests issued meanwhile wait for the running request to finish.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::time::Instant;

use movie_search_core::{perform, Command, Completion, Controller, Event, Key, Page, Transport};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

pub const HELP: &str = "\
<title>        search for a title
:open <n|id>   open a card by position or IMDb id
:key <n|id>    activate a card from the keyboard
:close         close the details (close button)
:backdrop      close the details (click outside)
:esc           press Escape
:help          show this help
:quit          exit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Events(Vec<Event>),
    Help,
    Quit,
    /// A card position with no card in the current grid.
    NoSuchCard(usize),
    Unknown(String),
}

/// Resolve a card reference: a 1-based position in the grid or a literal id.
///
/// A number is always a position; one outside the grid resolves to nothing.
fn card_id(reference: &str, page: &Page) -> Result<String, usize> {
    match reference.parse::<usize>() {
        Ok(n) => n
            .checked_sub(1)
            .and_then(|i| page.card_ids.get(i))
            .cloned()
            .ok_or(n),
        Err(_) => Ok(reference.to_string()),
    }
}

pub fn parse_line(line: &str, page: &Page) -> Input {
    let Some(command) = line.trim().strip_prefix(':') else {
        return Input::Events(vec![
            Event::InputChanged(line.to_string()),
            Event::InputKeyPressed(Key::Enter),
        ]);
    };
    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    let event = match (name, argument) {
        ("open" | "key", reference) if !reference.is_empty() => {
            let imdb_id = match card_id(reference, page) {
                Ok(imdb_id) => imdb_id,
                Err(position) => return Input::NoSuchCard(position),
            };
            if name == "open" {
                Event::CardClicked(imdb_id)
            } else {
                Event::CardKeyPressed {
                    imdb_id,
                    key: Key::Enter,
                }
            }
        }
        ("close", "") => Event::ModalCloseClicked,
        ("backdrop", "") => Event::ModalBackgroundClicked,
        ("esc", "") => Event::DocumentKeyDown(Key::Escape),
        ("help", "") => return Input::Help,
        ("quit" | "q", "") => return Input::Quit,
        _ => return Input::Unknown(line.trim().to_string()),
    };
    Input::Events(vec![event])
}

/// Text snapshot of the page.
pub fn render_page(controller: &Controller) -> String {
    let page = controller.page();
    let mut out = String::new();
    if page.spinner_visible {
        out.push_str("searching...\n");
    }
    if let Some(error) = controller.visible_error() {
        let _ = writeln!(out, "! {error}");
    }
    if !page.stats.is_empty() {
        let _ = writeln!(out, "{}", page.stats);
    }
    for (n, id) in page.card_ids.iter().enumerate() {
        match page.card_labels.get(n) {
            Some(label) => {
                let _ = writeln!(out, "  {}. {label} [{id}]", n + 1);
            }
            None => {
                let _ = writeln!(out, "  {}. {id}", n + 1);
            }
        }
    }
    if controller.state().modal_open {
        out.push_str(page.modal.as_str());
    }
    out
}

/// Current time on tokio's clock.
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

type Pending<'t> = Pin<Box<dyn Future<Output = Option<Completion>> + 't>>;

/// Drive `controller` from `input` until `:quit` or end of input.
///
/// At end of input any running request is allowed to finish first.
pub async fn run<'t, T, R, W>(
    controller: &mut Controller,
    transport: &'t T,
    input: R,
    mut output: W,
) -> io::Result<()>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut inflight: Option<Pending<'t>> = None;
    let mut queued: VecDeque<Command> = VecDeque::new();
    let mut input_open = true;

    output.write_all(render_page(controller).as_bytes()).await?;
    output.flush().await?;

    loop {
        if inflight.is_none() {
            if let Some(command) = queued.pop_front() {
                inflight = Some(Box::pin(perform(transport, command)));
            }
        }
        if !input_open && inflight.is_none() {
            break;
        }
        let deadline = controller.next_deadline();

        tokio::select! {
            biased;
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    input_open = false;
                    continue;
                };
                match parse_line(&line, controller.page()) {
                    Input::Quit => break,
                    Input::Help => output.write_all(HELP.as_bytes()).await?,
                    Input::NoSuchCard(position) => {
                        output
                            .write_all(format!("no card at position {position}\n").as_bytes())
                            .await?;
                    }
                    Input::Unknown(text) => {
                        output
                            .write_all(format!("unknown command: {text} (try :help)\n").as_bytes())
                            .await?;
                    }
                    Input::Events(events) => {
                        for event in events {
                            let command = controller.handle(event, now());
                            if !command.is_none() {
                                queued.push_back(command);
                            }
                        }
                    }
                }
            }
            completion = async {
                match inflight.as_mut() {
                    Some(pending) => pending.await,
                    None => std::future::pending().await,
                }
            }, if inflight.is_some() => {
                inflight = None;
                if let Some(completion) = completion {
                    controller.complete(completion, now());
                }
            }
            _ = tokio::time::sleep_until(tokio::time::Instant::from_std(
                deadline.unwrap_or_else(now),
            )), if deadline.is_some() => {
                if controller.fire_timers(now()) {
                    debug!("error banner timed out");
                }
            }
        }

        output.write_all(render_page(controller).as_bytes()).await?;
        output.flush().await?;
    }
    Ok(())
}
