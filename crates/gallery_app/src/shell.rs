use std::collections::HashSet;
use std::io::Write;

use gallery_core::{Page, RecordId};
use gallery_engine::{BulkOutcome, BulkSelectError, GallerySession};
use gallery_logging::{gallery_error, gallery_info};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::command::{self, Command, ParseError, SelectionEdit, HELP};
use crate::render::{render_bulk_completion, render_page};

type BulkResult = Result<BulkOutcome, BulkSelectError>;

/// Line-oriented stand-in for the paginated table: reads commands from stdin
/// until `quit` or end of input.
pub async fn run(mut session: GallerySession) -> anyhow::Result<()> {
    println!("{HELP}\n");
    let page_size = session.page().page_size;
    navigate(&mut session, 1, page_size).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let (bulk_done, mut bulk_results) = mpsc::unbounded_channel::<BulkResult>();
    loop {
        print!("> ");
        // A failed flush only loses the prompt.
        let _ = std::io::stdout().flush();

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => execute(&mut session, command, &bulk_done).await,
                    Err(ParseError::Empty) => {}
                    Err(err) => println!("{err}"),
                }
            }
            Some(result) = bulk_results.recv() => {
                print!("\n{}", render_bulk_completion(&result, &session.view()));
            }
        }
    }

    session.cancel_bulk_select();
    gallery_info!(
        "Shell closed with {} record(s) selected",
        session.selection().size()
    );
    Ok(())
}

async fn execute(
    session: &mut GallerySession,
    command: Command,
    bulk_done: &mpsc::UnboundedSender<BulkResult>,
) {
    let (page_number, page_size) = {
        let page = session.page();
        (page.page_number, page.page_size)
    };

    match command {
        Command::Page(number) => navigate(session, number, page_size).await,
        Command::Next => {
            if u64::from(page_number) >= session.page().total_pages() {
                println!("Already on the last page.");
            } else {
                navigate(session, page_number + 1, page_size).await;
            }
        }
        Command::Prev => {
            if page_number <= 1 {
                println!("Already on the first page.");
            } else {
                navigate(session, page_number - 1, page_size).await;
            }
        }
        Command::Size(size) => {
            if let Err(err) = session.change_page_size(size).await {
                println!("Could not load page: {err}");
            }
            print!("{}", render_page(&session.view()));
        }
        Command::Reload => {
            if let Err(err) = session.reload().await {
                println!("Could not load page: {err}");
            }
            print!("{}", render_page(&session.view()));
        }
        Command::Edit(edit) => {
            let current: HashSet<RecordId> = session
                .current_page_selection()
                .into_iter()
                .map(|record| record.id)
                .collect();
            let wanted = page_selection_after(&edit, session.page(), &current);
            session.toggle_page_selection(wanted);
            print!("{}", render_page(&session.view()));
        }
        Command::Select(target) => {
            let scan = session.spawn_bulk_select(target);
            let bulk_done = bulk_done.clone();
            tokio::spawn(async move {
                match scan.await {
                    // The shell may already have exited; the selection is kept either way.
                    Ok(result) => {
                        let _ = bulk_done.send(result);
                    }
                    Err(err) => gallery_error!("Bulk select task ended abnormally: {}", err),
                }
            });
        }
        Command::Cancel => session.cancel_bulk_select(),
        Command::Selected => {
            let ids = session.selection().snapshot().to_sorted_vec();
            println!("{} selected: {:?}", ids.len(), ids);
        }
        Command::Show => print!("{}", render_page(&session.view())),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}

async fn navigate(session: &mut GallerySession, page_number: u32, page_size: u32) {
    if let Err(err) = session.go_to_page(page_number, page_size).await {
        println!("Could not load page {page_number}: {err}");
    }
    print!("{}", render_page(&session.view()));
}

/// Full checkbox state of `page` after applying `edit` to `current`.
fn page_selection_after(
    edit: &SelectionEdit,
    page: &Page,
    current: &HashSet<RecordId>,
) -> Vec<RecordId> {
    page.ids()
        .filter(|id| match edit {
            SelectionEdit::Check(ids) => current.contains(id) || ids.contains(id),
            SelectionEdit::Uncheck(ids) => current.contains(id) && !ids.contains(id),
            SelectionEdit::Only(ids) => ids.contains(id),
            SelectionEdit::All => true,
            SelectionEdit::None => false,
        })
        .collect()
}
