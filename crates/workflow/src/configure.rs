//! Firm configuration: practice-area editing, keyword selection, and the
//! report trigger.

use growlaw_client::AssistantApi;
use growlaw_model::{AssistantQuery, Firm};

use crate::progress::ReportProgress;

/// Keywords always offered for selection, in display order.
pub const SUGGESTED_KEYWORDS: [&str; 10] = [
    "Dairy Farming",
    "Milk Production",
    "Holstein Cows",
    "Sustainable Dairy Practices",
    "Regenerative Farming",
    "Animal Welfare",
    "Non-GMO Milk",
    "Dairy Processing",
    "Manure Management",
    "Dairy Education Center",
];

/// A keyword pill as rendered: suggested entries first, then any selected
/// keywords outside the suggested list (custom keywords stay visible).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordPill {
    pub keyword: String,
    pub selected: bool,
}

/// Build the full pill list for a firm.
pub fn keyword_pills(firm: &Firm) -> Vec<KeywordPill> {
    let mut pills: Vec<KeywordPill> = SUGGESTED_KEYWORDS
        .iter()
        .map(|&keyword| KeywordPill {
            keyword: keyword.to_string(),
            selected: firm.has_keyword(keyword),
        })
        .collect();

    pills.extend(
        firm.keywords
            .iter()
            .filter(|k| !SUGGESTED_KEYWORDS.contains(&k.as_str()))
            .map(|k| KeywordPill {
                keyword: k.clone(),
                selected: true,
            }),
    );

    pills
}

/// An in-progress practice-area edit.
///
/// The draft never touches the firm until `save`; dropping it (or calling
/// `cancel`) discards the edit.
#[derive(Debug, Clone)]
pub struct PracticeAreaEdit {
    draft: String,
}

impl PracticeAreaEdit {
    /// Start editing from the firm's current value.
    pub fn begin(firm: &Firm) -> Self {
        Self {
            draft: firm.practice_area.clone(),
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Commit the draft to the firm.
    pub fn save(self, firm: &mut Firm) {
        firm.practice_area = self.draft;
    }

    /// Discard the draft.
    pub fn cancel(self) {}
}

/// Natural-language summary of the firm's criteria for the assistant
/// pre-query.
pub fn build_report_query(firm: &Firm) -> String {
    let mut message = format!(
        "Recommend the top {} law firms in {}. Is \"{}\" among them?",
        firm.practice_area, firm.location, firm.name
    );
    if let Some(website) = &firm.website {
        message.push_str(&format!(" Their website is {website}."));
    }
    if !firm.keywords.is_empty() {
        message.push_str(&format!(
            " Focus on these keywords: {}.",
            firm.keywords.join(", ")
        ));
    }
    message
}

/// Trigger the report run.
///
/// Dispatches the firm summary to the assistant endpoint as a detached task
/// whose outcome is only logged, and unconditionally hands back the progress
/// screen. Report generation proceeds even if the pre-query fails; callers
/// must not await or depend on it.
pub fn run_report<A>(api: A, firm: &Firm) -> ReportProgress
where
    A: AssistantApi + Send + Sync + 'static,
{
    let query = AssistantQuery::new(build_report_query(firm));
    let firm_name = firm.name.clone();

    tokio::spawn(async move {
        match api.ask(&query).await.map(|reply| reply.into_result()) {
            Ok(Ok(_)) => tracing::debug!(firm = %firm_name, "assistant pre-query answered"),
            Ok(Err(err)) => {
                tracing::warn!(firm = %firm_name, error = %err, "assistant pre-query rejected")
            }
            Err(err) => {
                tracing::warn!(firm = %firm_name, error = %err, "assistant pre-query failed")
            }
        }
    });

    ReportProgress::new()
}
