//! Interactive terminal session: form, generation, report and actions.
//!
//! Input is read line by line from any `BufRead`, so the whole flow can be
//! driven from a script in tests.

use crate::output;
use crate::progress::LoadingSpinner;
use ads_common::clipboard::{copy_targeting, ClipboardSink, CopyFeedback};
use ads_common::export;
use ads_common::{AppState, FormField, GenerationBackend, Report, StrategyController, StrategyForm};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// What the user picked after a report or a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    NewReport,
    Retry,
    Quit,
}

/// Menu label for the copy action, with a countdown while the confirmation shows
fn copy_label(feedback: &CopyFeedback) -> String {
    match feedback.remaining() {
        Some(left) => format!("copied ({:.1}s)", left.as_secs_f32()),
        None => "copy targeting".to_string(),
    }
}

pub struct Session<B, R, C> {
    controller: StrategyController<B>,
    input: R,
    clipboard: C,
    feedback: CopyFeedback,
    out_dir: PathBuf,
}

impl<B, R, C> Session<B, R, C>
where
    B: GenerationBackend,
    R: BufRead,
    C: ClipboardSink,
{
    pub fn new(controller: StrategyController<B>, input: R, clipboard: C, out_dir: PathBuf) -> Self {
        Self {
            controller,
            input,
            clipboard,
            feedback: CopyFeedback::default(),
            out_dir,
        }
    }

    pub fn controller(&self) -> &StrategyController<B> {
        &self.controller
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Run until the user quits or input ends
    pub async fn run(&mut self) -> Result<()> {
        println!();
        println!("{}", "Meta Ads Expert".bold());
        println!("{}", "Expert campaign strategy from three inputs.".dimmed());

        'forms: loop {
            let form = match self.read_form()? {
                Some(form) => form,
                None => return Ok(()),
            };

            loop {
                self.generate(&form).await;

                let next = match self.controller.state() {
                    AppState::Success(report) => {
                        let report = report.clone();
                        self.report_menu(&report)?
                    }
                    _ => self.failure_menu()?,
                };

                match next {
                    Next::Retry => continue,
                    Next::NewReport => {
                        self.controller.reset();
                        continue 'forms;
                    }
                    Next::Quit => return Ok(()),
                }
            }
        }
    }

    async fn generate(&mut self, form: &StrategyForm) {
        let spinner = LoadingSpinner::follow(self.controller.subscribe_status());
        let result = self.controller.submit(form).await;
        let elapsed = spinner.finish();

        match result {
            Ok(AppState::Success(report)) => {
                output::display_report(report);
                tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "Report ready");
            }
            Ok(state) => {
                if let Some(message) = state.error_message() {
                    output::display_error(message);
                }
            }
            // read_form only returns submittable forms
            Err(e) => output::display_warning(&e.to_string()),
        }
    }

    /// Prompt for the three fields, re-prompting the blank ones.
    ///
    /// Returns `None` when input ends.
    fn read_form(&mut self) -> Result<Option<StrategyForm>> {
        let mut form = StrategyForm::default();
        let mut pending: Vec<FormField> = FormField::ALL.to_vec();

        println!();
        while !pending.is_empty() {
            for field in &pending {
                let prompt = format!("{} ({}): ", field.label(), field.placeholder().dimmed());
                match self.read_line(&prompt)? {
                    Some(value) => form.set(*field, value),
                    None => return Ok(None),
                }
            }

            pending = form.missing_fields();
            if let Err(e) = form.validate() {
                output::display_warning(&e.to_string());
            }
        }

        Ok(Some(form))
    }

    fn report_menu(&mut self, report: &Report) -> Result<Next> {
        loop {
            let copy_item = match self.feedback.remaining() {
                Some(_) => copy_label(&self.feedback).green().to_string(),
                None => copy_label(&self.feedback),
            };
            let menu = format!(
                "[c] {}  [s] save CSV  [p] save PDF  [n] new report  [q] quit > ",
                copy_item
            );

            let choice = match self.read_line(&menu)? {
                Some(choice) => choice,
                None => return Ok(Next::Quit),
            };

            match choice.trim() {
                "c" => match copy_targeting(report, &mut self.clipboard, &mut self.feedback) {
                    Ok(()) => output::display_success("Targeting copied to clipboard"),
                    Err(e) => {
                        tracing::warn!(code = e.code(), "Copy failed: {}", e);
                        output::display_error(&e.to_string());
                    }
                },
                "s" => self.save(export::write_csv(report, &self.out_dir)),
                "p" => self.save(export::write_pdf(report, &self.out_dir)),
                "n" => return Ok(Next::NewReport),
                "q" => return Ok(Next::Quit),
                "" => {}
                other => output::display_warning(&format!("Unknown choice: {}", other)),
            }
        }
    }

    fn failure_menu(&mut self) -> Result<Next> {
        loop {
            let choice = match self.read_line("[r] retry  [n] new report  [q] quit > ")? {
                Some(choice) => choice,
                None => return Ok(Next::Quit),
            };
            match choice.trim() {
                "r" => return Ok(Next::Retry),
                "n" => return Ok(Next::NewReport),
                "q" => return Ok(Next::Quit),
                "" => {}
                other => output::display_warning(&format!("Unknown choice: {}", other)),
            }
        }
    }

    fn save(&self, result: Result<PathBuf, export::ExportError>) {
        match result {
            Ok(path) => output::display_success(&format!("Saved {}", path.display())),
            Err(e) => {
                tracing::error!(code = e.code(), "Export failed: {}", e);
                output::display_error(&e.to_string());
            }
        }
    }

    /// Read one line without its terminator. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{}", prompt);
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
