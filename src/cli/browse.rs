//! Interactive browsing with live search.
//!
//! Every stdin line is taken as the new contents of the search box and goes
//! through the debounce. Lines starting with `/` are commands.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{mount_session, print_view, report_update, TerminalGrid};
use crate::core::{InputOutcome, SessionUpdate};
use crate::domain::Tab;

/// A parsed line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseInput {
    /// New search box contents
    Typed(String),

    /// Submit the given term, or the current box contents
    Submit(Option<String>),

    Tab(Tab),

    Cancel,

    Quit,

    /// Unrecognized command
    Invalid(String),
}

/// Parse one line typed at the prompt
pub fn parse_input(line: &str) -> BrowseInput {
    let line = line.trim_end_matches(['\r', '\n']);

    let Some(command) = line.strip_prefix('/') else {
        return BrowseInput::Typed(line.to_string());
    };

    let (name, arg) = match command.split_once(' ') {
        Some((name, arg)) => (name, Some(arg.trim())),
        None => (command, None),
    };

    match name {
        "submit" | "s" => BrowseInput::Submit(arg.map(str::to_string)),
        "tab" | "t" => match arg.map(str::parse::<Tab>) {
            Some(Ok(tab)) => BrowseInput::Tab(tab),
            Some(Err(e)) => BrowseInput::Invalid(e.to_string()),
            None => BrowseInput::Invalid("Usage: /tab <all|audio|text|video>".to_string()),
        },
        "cancel" | "c" => BrowseInput::Cancel,
        "quit" | "q" | "exit" => BrowseInput::Quit,
        other => BrowseInput::Invalid(format!("Unknown command: /{}", other)),
    }
}

/// Run the interactive browser until `/quit` or end of input
pub async fn run() -> Result<()> {
    let mut session = mount_session().await?;
    print_view(&session.view(), &TerminalGrid);

    println!();
    println!("Type to search. Commands: /submit [term], /tab <name>, /cancel, /quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                match parse_input(&line) {
                    BrowseInput::Typed(text) => {
                        if session.input_changed(&text) == InputOutcome::Ignored && !text.is_empty() {
                            eprintln!("(keep typing: searches start at three characters)");
                        }
                    }
                    BrowseInput::Submit(term) => {
                        let term = term.unwrap_or_else(|| {
                            session.store().state().pending_search_term.clone()
                        });
                        let ticket = session.submit(&term);
                        eprintln!("[{}] searching for {:?}", ticket, term);
                    }
                    BrowseInput::Tab(tab) => {
                        session.select_tab(tab);
                        print_view(&session.view(), &TerminalGrid);
                    }
                    BrowseInput::Cancel => {
                        if !session.cancel_pending() {
                            eprintln!("(nothing pending)");
                        }
                    }
                    BrowseInput::Quit => break,
                    BrowseInput::Invalid(message) => eprintln!("{}", message),
                }
            }
            update = session.next_update(), if session.is_busy() => {
                if let Some(update) = update {
                    report_update(&update);
                    if matches!(update, SessionUpdate::Applied { .. }) {
                        print_view(&session.view(), &TerminalGrid);
                    }
                }
            }
        }
    }

    session.unmount();
    Ok(())
}
