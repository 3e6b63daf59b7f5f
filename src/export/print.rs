use crate::error::Result;
use crate::models::ExportOptions;
use crate::platform::{PrintOutcome, Printer};
use crate::ui::Presentation;

/// Print mode held on a view's presentation. Dropping it puts back exactly
/// what was there before, on every exit path.
pub struct PrintMode<'a> {
    presentation: &'a mut Presentation,
    saved: Presentation,
}

impl<'a> PrintMode<'a> {
    pub fn enter(presentation: &'a mut Presentation, options: ExportOptions) -> Self {
        let saved = *presentation;
        *presentation = Presentation {
            printing: true,
            hide_source_class: saved.hide_source_class || !options.include_source,
            time_hidden: !options.include_time,
            source_hidden: !options.include_source,
        };
        Self {
            presentation,
            saved,
        }
    }

    pub fn presentation(&self) -> &Presentation {
        &*self.presentation
    }
}

impl Drop for PrintMode<'_> {
    fn drop(&mut self) {
        *self.presentation = self.saved;
    }
}

/// Switch to print mode, render the view, run the print flow, restore.
pub async fn print_view<F>(
    presentation: &mut Presentation,
    options: ExportOptions,
    render: F,
    printer: &dyn Printer,
) -> Result<PrintOutcome>
where
    F: FnOnce(&Presentation) -> String,
{
    let mode = PrintMode::enter(presentation, options);
    let document = render(mode.presentation());
    tracing::debug!("print mode entered: {:?}", mode.presentation());
    let outcome = printer.print(&document).await;
    drop(mode);
    outcome
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::AppError;
    use crate::models::Note;
    use crate::ui::{render_page, ListRegion};

    struct RecordingPrinter {
        result: fn() -> Result<PrintOutcome>,
        seen: Mutex<Vec<String>>,
    }

    impl RecordingPrinter {
        fn new(result: fn() -> Result<PrintOutcome>) -> Self {
            Self {
                result,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn last(&self) -> String {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Printer for RecordingPrinter {
        async fn print(&self, document: &str) -> Result<PrintOutcome> {
            self.seen.lock().unwrap().push(document.to_string());
            (self.result)()
        }
    }

    fn list() -> ListRegion {
        ListRegion::from_notes(vec![Note {
            id: 1,
            content: "hello".to_string(),
            source_url: "https://x.com".to_string(),
            source_title: Some("X".to_string()),
            timestamp: "2024/1/1 10:00:00".to_string(),
        }])
    }

    fn no_source() -> ExportOptions {
        ExportOptions {
            include_time: true,
            include_source: false,
        }
    }

    #[tokio::test]
    async fn hides_source_while_printing_then_restores() {
        let list = list();
        let mut presentation = Presentation::default();
        let printer = RecordingPrinter::new(|| Ok(PrintOutcome::Completed));

        let outcome = print_view(
            &mut presentation,
            no_source(),
            |p| render_page(&list, p, false, no_source()),
            &printer,
        )
        .await
        .unwrap();

        assert_eq!(outcome, PrintOutcome::Completed);
        let printed = printer.last();
        assert!(printed.contains(r#"<body class="printing-mode hide-source">"#));
        assert!(printed.contains(r#"class="meta-source screen-only" style="display:none""#));
        assert!(printed.contains(r#"class="meta-time">"#));

        assert_eq!(presentation, Presentation::default());
        let after = render_page(&list, &presentation, false, no_source());
        assert!(after.contains(r#"class="meta-source screen-only">"#));
    }

    #[tokio::test]
    async fn restores_after_cancelled_dialog() {
        let mut presentation = Presentation::default();
        let printer = RecordingPrinter::new(|| Ok(PrintOutcome::Cancelled));

        let outcome = print_view(&mut presentation, no_source(), |_| String::new(), &printer)
            .await
            .unwrap();

        assert_eq!(outcome, PrintOutcome::Cancelled);
        assert_eq!(presentation, Presentation::default());
    }

    #[tokio::test]
    async fn restores_after_print_failure() {
        let mut presentation = Presentation::default();
        let printer = RecordingPrinter::new(|| Err(AppError::Platform("no printer".to_string())));

        let result = print_view(&mut presentation, no_source(), |_| String::new(), &printer).await;

        assert!(result.is_err());
        assert_eq!(presentation, Presentation::default());
    }

    #[tokio::test]
    async fn shows_print_only_source_when_included() {
        let list = list();
        let mut presentation = Presentation::default();
        let printer = RecordingPrinter::new(|| Ok(PrintOutcome::Completed));
        let options = ExportOptions::default();

        print_view(&mut presentation, options, |p| render_page(&list, p, false, options), &printer)
            .await
            .unwrap();

        let printed = printer.last();
        assert!(printed.contains(r#"<body class="printing-mode">"#));
        assert!(printed.contains(r#"class="meta-source print-only">"#));
    }

    #[test]
    fn guard_restores_prior_non_default_state() {
        let prior = Presentation {
            printing: false,
            hide_source_class: false,
            time_hidden: true,
            source_hidden: false,
        };
        let mut presentation = prior;
        {
            let mode = PrintMode::enter(&mut presentation, no_source());
            assert!(mode.presentation().printing);
            assert!(!mode.presentation().time_hidden);
            assert!(mode.presentation().source_hidden);
        }
        assert_eq!(presentation, prior);
    }
}
