use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::Terminal;
use tokio::sync::broadcast::error::RecvError;

use minewatch::app::App;
use minewatch::cli::{handle_info_command, parse_args, run_cli_command};
use minewatch::startup::{init_logging, ConsoleConfig, ConsoleContext};
use minewatch::terminal::{install_panic_hook, ConsoleTerminal};
use minewatch::ui;

fn main() -> Result<()> {
    color_eyre::install()?;

    let command = parse_args(std::env::args());
    if handle_info_command(&command) {
        return Ok(());
    }

    let (config, ignored) = ConsoleConfig::from_env_checked();
    if let Err(e) = init_logging(&config) {
        eprintln!("warning: logging disabled ({}): {}", config.log_path().display(), e);
    }
    for setting in &ignored {
        tracing::warn!("{}", setting);
        eprintln!("warning: {}", setting);
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let context = ConsoleContext::build(config)?;

    if let Some(result) = runtime.block_on(run_cli_command(command, &context)) {
        return result;
    }

    install_panic_hook();

    let state = runtime.block_on(context.restore());
    let mut app = App::from_context(&context);

    let mut console = ConsoleTerminal::open()?;
    let result = runtime.block_on(async {
        app.start(&state);
        run_app(console.terminal(), &mut app).await
    });
    console.restore()?;

    tracing::info!("Console exited");
    result
}

/// Draw when dirty, and dispatch ticks, terminal events, task results and
/// session events until the app quits.
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut message_rx = app
        .message_rx
        .take()
        .ok_or_else(|| eyre!("message receiver already taken"))?;
    let mut session_rx = app
        .session_rx
        .take()
        .ok_or_else(|| eyre!("session receiver already taken"))?;
    let mut session_open = true;

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        let timeout = tokio::time::sleep(std::time::Duration::from_millis(16));

        tokio::select! {
            _ = timeout => app.tick(),

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) => app.handle_key(key),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Terminal event error");
                    }
                    None => app.quit(),
                }
            }

            Some(msg) = message_rx.recv() => app.handle_message(msg),

            event = session_rx.recv(), if session_open => {
                match event {
                    Ok(event) => app.handle_session_event(event),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "Session events lagged");
                        app.sync_session();
                    }
                    Err(RecvError::Closed) => session_open = false,
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
