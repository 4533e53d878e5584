//! Report-progress screen state.
//!
//! Cosmetic only: a fixed four-step sequence with static completion
//! percentages and a client-side elapsed-time counter. This is not a real
//! progress tracker and never talks to the backend.

/// One displayed analysis step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStep {
    pub id: u8,
    pub name: &'static str,
    pub description: &'static str,
    /// Static completion percentage.
    pub progress: u8,
    pub completed: bool,
}

/// The fixed step sequence shown while a report is "generating".
pub const REPORT_STEPS: [ProgressStep; 4] = [
    ProgressStep {
        id: 1,
        name: "Website Analysis",
        description: "Identifying your practice areas and keywords from your website.",
        progress: 100,
        completed: true,
    },
    ProgressStep {
        id: 2,
        name: "AI Testing",
        description: "Checking if AI assistants (ChatGPT, Perplexity, Gemini) recommend your firm.",
        progress: 100,
        completed: true,
    },
    ProgressStep {
        id: 3,
        name: "Competitor Research",
        description: "Comparing how often you show up versus other firms in your area.",
        progress: 100,
        completed: true,
    },
    ProgressStep {
        id: 4,
        name: "Report Generation",
        description: "Building your AI Visibility Score, competitor breakdown, and action steps.",
        progress: 60,
        completed: false,
    },
];

const MISSING_CONTACT_MESSAGE: &str = "Please fill in all contact fields";

/// Contact-capture fields collected on the progress screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub business_email: String,
}

/// State for the report-progress screen.
#[derive(Debug, Clone, Default)]
pub struct ReportProgress {
    elapsed_secs: u64,
    contact: ContactForm,
    contact_submitted: bool,
}

impl ReportProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &'static [ProgressStep] {
        &REPORT_STEPS
    }

    /// Advance the elapsed-time counter by one second.
    pub fn tick(&mut self) {
        self.elapsed_secs += 1;
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Elapsed time as displayed, e.g. "1m 5s".
    pub fn elapsed_label(&self) -> String {
        format_elapsed(self.elapsed_secs)
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactForm {
        &mut self.contact
    }

    pub fn contact_submitted(&self) -> bool {
        self.contact_submitted
    }

    /// Validate and record the contact form.
    ///
    /// Where the captured contact ends up is not wired yet; for now it is
    /// only logged.
    pub fn submit_contact(&mut self) -> Result<(), &'static str> {
        let contact = &self.contact;
        if contact.first_name.trim().is_empty()
            || contact.last_name.trim().is_empty()
            || contact.business_email.trim().is_empty()
        {
            return Err(MISSING_CONTACT_MESSAGE);
        }

        tracing::info!(
            email = %contact.business_email,
            "contact captured for report delivery"
        );
        self.contact_submitted = true;
        Ok(())
    }
}

fn format_elapsed(secs: u64) -> String {
    format!("{}m {}s", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn steps_are_fixed() {
        let progress = ReportProgress::new();
        let percentages: Vec<u8> = progress.steps().iter().map(|s| s.progress).collect();
        assert_eq!(percentages, vec![100, 100, 100, 60]);

        let names: Vec<&str> = progress.steps().iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "Website Analysis",
                "AI Testing",
                "Competitor Research",
                "Report Generation"
            ]
        );
        assert!(!progress.steps()[3].completed);
    }

    #[test]
    fn timer_ticks_and_formats() {
        let mut progress = ReportProgress::new();
        assert_eq!(progress.elapsed_label(), "0m 0s");
        for _ in 0..65 {
            progress.tick();
        }
        assert_eq!(progress.elapsed_secs(), 65);
        assert_eq!(progress.elapsed_label(), "1m 5s");
    }

    #[test]
    fn contact_requires_all_fields() {
        let mut progress = ReportProgress::new();
        progress.contact_mut().first_name = "Ada".to_string();
        assert_eq!(
            progress.submit_contact(),
            Err("Please fill in all contact fields")
        );
        assert!(!progress.contact_submitted());

        progress.contact_mut().last_name = "Lovelace".to_string();
        progress.contact_mut().business_email = "ada@firm.com".to_string();
        assert_eq!(progress.submit_contact(), Ok(()));
        assert!(progress.contact_submitted());
    }
}
