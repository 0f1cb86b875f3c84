use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::console::{LineOutcome, Session, StyleTag};
use crate::error::{AppError, AppResult};
use crate::event::AppEvent;

/// Line-oriented console over any reader and writer, for pipes and
/// terminals without raw mode.
pub async fn run_plain<R, W>(session: &mut Session, reader: R, mut writer: W) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    for line in session.welcome_lines() {
        write_line(&mut writer, &line).await?;
    }

    let mut lines = reader.lines();
    loop {
        write_str(&mut writer, session.prompt_label()).await?;
        writer.flush().await.map_err(write_error)?;

        let Some(line) = lines
            .next_line()
            .await
            .map_err(|source| AppError::io_with_context(source, "failed to read console input"))?
        else {
            break;
        };

        if !session.validate(&line) {
            continue;
        }
        match session.submit(&line).await {
            Ok(outcome) => write_outcome(&mut writer, session, &outcome).await?,
            Err(err) if err.is_line_local() => {
                write_line(&mut writer, &format!("! {err}")).await?;
            }
            Err(err) => return Err(err),
        }
    }

    write_line(&mut writer, "").await?;
    writer.flush().await.map_err(write_error)
}

async fn write_outcome<W>(writer: &mut W, session: &Session, outcome: &LineOutcome) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
{
    for message in outcome.instruction.messages() {
        match message.style {
            StyleTag::Value => write_line(writer, &message.text).await?,
            StyleTag::Error => write_line(writer, &format!("error: {}", message.text)).await?,
        }
    }

    for event in &outcome.events {
        let AppEvent::PageChanged(change) = event else {
            continue;
        };
        let tutorial = session.interpreter().state();
        let Some(page) = tutorial.page(change.to) else {
            continue;
        };
        write_line(
            writer,
            &format!("-- {} ({}/{}) --", page.title, change.to + 1, tutorial.page_count()),
        )
        .await?;
        if !page.body.is_empty() {
            write_line(writer, &page.body).await?;
        }
        if let Some(url) = &page.url {
            write_line(writer, url).await?;
        }
        for example in &page.examples {
            write_line(writer, &format!("  try: {example}")).await?;
        }
    }
    Ok(())
}

async fn write_line<W>(writer: &mut W, text: &str) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
{
    write_str(writer, text).await?;
    write_str(writer, "\n").await
}

async fn write_str<W>(writer: &mut W, text: &str) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(text.as_bytes()).await.map_err(write_error)
}

fn write_error(source: std::io::Error) -> AppError {
    AppError::io_with_context(source, "failed to write console output")
}
