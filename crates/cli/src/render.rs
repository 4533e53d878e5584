//! Text rendering for CLI output.

use growlaw_model::{AnalysisJob, DocumentGrade, JobStatus, Place, RankingReport};
use growlaw_workflow::ReportProgress;

pub fn print_candidates(candidates: &[Place]) {
    for (i, place) in candidates.iter().enumerate() {
        println!("\n{}. {}", i + 1, place.name);
        println!("   {}", place.address);
        if let Some(website) = &place.website {
            println!("   {}", website);
        }
        if let Some(phone) = &place.phone_number {
            println!("   {}", phone);
        }
    }
    println!("\n---");
    println!("Total: {} results", candidates.len());
}

pub fn print_job(job: &AnalysisJob) {
    println!("Status: {} (Job ID: {})", job.status.label(), job.job_id);

    match job.status {
        JobStatus::Processing | JobStatus::Pending => {
            println!("Analysis in progress... This may take a few minutes.");
        }
        JobStatus::Failed => {
            println!("Analysis failed. Please try again.");
        }
        JobStatus::Completed => {
            if let Some(results) = &job.results {
                println!("\nOverall Score: {}/100", results.score);
                println!("\nDetailed Breakdown");
                println!("   Website Quality:   {}/100", results.analysis.website_quality);
                println!("   Content Relevance: {}/100", results.analysis.content_relevance);
                println!("   User Experience:   {}/100", results.analysis.user_experience);
                println!("   Legal Compliance:  {}/100", results.analysis.legal_compliance);
                if !results.feedback.is_empty() {
                    println!("\nFeedback: {}", results.feedback);
                }
                if !results.suggestions.is_empty() {
                    println!("\nRecommendations:");
                    for suggestion in &results.suggestions {
                        println!("   - {}", suggestion);
                    }
                }
            }
        }
    }
}

pub fn print_grade(grade: &DocumentGrade) {
    println!("Overall Score: {}/100", grade.score);
    println!("\nDetailed Breakdown");
    println!("   Structure:      {}/100", grade.analysis.structure);
    println!("   Content:        {}/100", grade.analysis.content);
    println!("   Legal Accuracy: {}/100", grade.analysis.legal_accuracy);
    println!("   Clarity:        {}/100", grade.analysis.clarity);
    if !grade.feedback.is_empty() {
        println!("\nFeedback: {}", grade.feedback);
    }
    if !grade.suggestions.is_empty() {
        println!("\nSuggestions for Improvement:");
        for suggestion in &grade.suggestions {
            println!("   - {}", suggestion);
        }
    }
}

pub fn print_ranking(report: &RankingReport) {
    if let Some(name) = &report.business_name {
        println!("AI Visibility for: {}", name);
    }

    if let Some(summary) = &report.summary {
        println!("\nVisibility Score: {}%", summary.visibility_score);
        println!(
            "Visible on {}/{} platforms",
            summary.visible_on, summary.total_platforms
        );
        println!("Grade: {}", summary.grade);
        match summary.average_position {
            Some(avg) => println!("Average Position: {:.1}", avg),
            None => println!("Average Position: n/a"),
        }
    }

    if !report.platforms.is_empty() {
        println!("\nPlatforms:");
        for result in report.platforms.values() {
            let line = if let Some(error) = &result.error {
                format!("error: {}", error)
            } else if result.is_visible {
                match result.rank {
                    Some(rank) => format!("visible (rank {})", rank),
                    None => "visible".to_string(),
                }
            } else {
                "not visible".to_string()
            };
            println!("   - {}: {}", result.platform, line);
        }
    }
}

pub fn print_progress_steps(progress: &ReportProgress) {
    println!("Analysis Progress");
    for step in progress.steps() {
        let marker = if step.completed {
            "✓".to_string()
        } else {
            step.id.to_string()
        };
        println!("\n {} {} ({}%)", marker, step.name, step.progress);
        println!("   {}", step.description);
    }
}
