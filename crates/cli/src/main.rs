//! GrowLaw command-line front end.
//!
//! Usage:
//!     growlaw search "Acme Law" --location "Chicago, IL"
//!     growlaw analyze https://acmelaw.com --name "Acme Law" --email a@b.com
//!     growlaw grade ./contract.pdf
//!     growlaw visibility "MVP Law Firm" --location "Chicago, IL"
//!     growlaw report "Acme Law" --keyword "Animal Welfare"

mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use growlaw_client::{
    ApiConfig, AssistantApi, DirectoryApi, DocumentApi, GraderClient, RankingApi,
};
use growlaw_model::{AssistantQuery, ComprehensiveRequest, RankingRequest};
use growlaw_workflow::{
    run_report, AnalysisWorkflow, PracticeAreaEdit, SearchStage, SearchWorkflow, UploadWorkflow,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "growlaw")]
#[command(about = "Grade law-firm AI visibility from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL
    #[arg(long, global = true, default_value = "http://localhost:3001")]
    base_url: String,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the directory for law firms
    Search {
        /// Firm name to search for
        query: String,

        /// Location to search around ("Chicago, IL")
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Look up a city
    City {
        city: String,
    },

    /// Fetch details for a single place
    Place {
        place_id: String,
    },

    /// Submit a firm website analysis and watch it to completion
    Analyze {
        /// Firm website URL
        firm_url: String,

        /// Firm name
        #[arg(short, long)]
        name: String,

        /// Contact email for the report
        #[arg(short, long)]
        email: String,

        /// Submit without polling for the outcome
        #[arg(long)]
        no_watch: bool,
    },

    /// Upload a document for grading
    Grade {
        /// Path to the document
        file: PathBuf,
    },

    /// Check AI platform visibility for a business
    Visibility {
        /// Business name
        business: String,

        /// Comma-separated keywords
        #[arg(short, long)]
        keywords: Option<String>,

        /// Research location
        #[arg(short, long)]
        location: String,

        #[arg(long)]
        industry: Option<String>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        city: Option<String>,

        /// Use the basic single-query check
        #[arg(long)]
        basic: bool,

        /// Use the diagnostic test endpoint
        #[arg(long, conflicts_with = "basic")]
        diagnostic: bool,
    },

    /// List past document grades, or show one by id
    History {
        /// Grade id to fetch
        #[arg(long)]
        id: Option<String>,
    },

    /// Ask the assistant endpoint a free-form question
    Ask {
        message: String,

        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        temperature: Option<f32>,
    },

    /// Run the search -> configure -> report flow end to end
    Report {
        /// Firm name to search for
        query: String,

        #[arg(short, long)]
        location: Option<String>,

        /// Candidate to pick from the search results (1-based)
        #[arg(long, default_value = "1")]
        pick: usize,

        /// Override the practice area before running the report
        #[arg(long)]
        practice_area: Option<String>,

        /// Keywords to toggle on (repeatable)
        #[arg(short, long)]
        keyword: Vec<String>,

        /// Seconds to keep the progress timer running
        #[arg(long, default_value = "5")]
        watch_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("growlaw=debug".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = ApiConfig {
        base_url: cli.base_url,
        ..Default::default()
    };
    let client = GraderClient::new(config);
    let json = cli.format == "json";

    match cli.command {
        Commands::Search { query, location } => {
            run_search(&client, &query, location.as_deref(), json).await?;
        }
        Commands::City { city } => {
            let response = client.search_city(&city).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                for result in &response.results {
                    println!(
                        "{} ({}, {}) [{} / {}]",
                        result.name,
                        result.location.latitude,
                        result.location.longitude,
                        result.class,
                        result.kind
                    );
                }
                println!("---");
                println!("Total: {} results", response.total_results);
            }
        }
        Commands::Place { place_id } => {
            let place = client.place_details(&place_id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&place)?);
            } else {
                println!("{}", place.name);
                println!("{}", place.address);
                if let Some(website) = &place.website {
                    println!("{}", website);
                }
            }
        }
        Commands::Analyze {
            firm_url,
            name,
            email,
            no_watch,
        } => {
            run_analyze(&client, &firm_url, &name, &email, no_watch, json).await?;
        }
        Commands::Grade { file } => {
            run_grade(&client, &file, json).await?;
        }
        Commands::Visibility {
            business,
            keywords,
            location,
            industry,
            url,
            city,
            basic,
            diagnostic,
        } => {
            let report = if basic {
                let request = RankingRequest {
                    business_name: business,
                    keywords,
                    location,
                };
                client.check_ranking(&request).await?
            } else {
                let request = ComprehensiveRequest {
                    business,
                    keywords,
                    location,
                    industry,
                    url,
                    city,
                };
                if diagnostic {
                    client.test_check(&request).await?
                } else {
                    client.comprehensive_check(&request).await?
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                render::print_ranking(&report);
            }
        }
        Commands::History { id } => {
            let grades = match id {
                Some(id) => vec![client.analysis_by_id(&id).await?],
                None => client.analysis_history().await?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&grades)?);
            } else if grades.is_empty() {
                println!("No document grades recorded.");
            } else {
                for grade in &grades {
                    println!("\n=== {} ({}) ===", grade.id, grade.timestamp);
                    render::print_grade(grade);
                }
            }
        }
        Commands::Ask {
            message,
            model,
            temperature,
        } => {
            let query = AssistantQuery {
                message,
                model,
                temperature,
            };
            let reply = client.ask(&query).await?;
            match reply.into_result() {
                Ok(answer) => println!("{}", answer),
                Err(error) => anyhow::bail!("assistant error: {error}"),
            }
        }
        Commands::Report {
            query,
            location,
            pick,
            practice_area,
            keyword,
            watch_secs,
        } => {
            run_report_flow(
                &client,
                &query,
                location.as_deref(),
                pick,
                practice_area,
                &keyword,
                watch_secs,
            )
            .await?;
        }
    }

    Ok(())
}

async fn run_search(
    client: &GraderClient,
    query: &str,
    location: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut flow = SearchWorkflow::new(client.clone());
    flow.search(query, location).await;

    if let Some(error) = flow.error() {
        anyhow::bail!("{error}");
    }
    if let Some(notice) = flow.notice() {
        println!("{notice}");
        return Ok(());
    }

    let SearchStage::Selecting { candidates } = flow.stage() else {
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(candidates)?);
    } else {
        println!("Law firms matching \"{query}\":");
        render::print_candidates(candidates);
    }

    Ok(())
}

async fn run_analyze(
    client: &GraderClient,
    firm_url: &str,
    name: &str,
    email: &str,
    no_watch: bool,
    json: bool,
) -> Result<()> {
    let mut flow = AnalysisWorkflow::new(client.clone());
    flow.submit(firm_url, name, email).await;

    if let Some(error) = flow.error() {
        anyhow::bail!("{error}");
    }

    if !no_watch && flow.is_polling() {
        println!("Analysis started. Polling for the result...");
        flow.track().await;
    }

    let Some(job) = flow.job() else {
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(job)?);
    } else {
        render::print_job(job);
    }

    Ok(())
}

async fn run_grade(client: &GraderClient, file: &PathBuf, json: bool) -> Result<()> {
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());
    let bytes = tokio::fs::read(file).await?;

    let mut flow = UploadWorkflow::new(client.clone());
    flow.choose(file_name, bytes);
    flow.submit().await;

    if let Some(error) = flow.error() {
        anyhow::bail!("{error}");
    }

    let Some(grade) = flow.grade() else {
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(grade)?);
    } else {
        render::print_grade(grade);
    }

    Ok(())
}

async fn run_report_flow(
    client: &GraderClient,
    query: &str,
    location: Option<&str>,
    pick: usize,
    practice_area: Option<String>,
    keywords: &[String],
    watch_secs: u64,
) -> Result<()> {
    let mut flow = SearchWorkflow::new(client.clone());
    flow.search(query, location).await;

    if let Some(error) = flow.error() {
        anyhow::bail!("{error}");
    }
    if let Some(notice) = flow.notice() {
        println!("{notice}");
        return Ok(());
    }

    let place_id = {
        let SearchStage::Selecting { candidates } = flow.stage() else {
            anyhow::bail!("no candidates to pick from");
        };
        let Some(place) = candidates.get(pick.saturating_sub(1)) else {
            anyhow::bail!("pick {pick} is out of range ({} candidates)", candidates.len());
        };
        place.place_id.clone()
    };
    if !flow.select(&place_id) {
        anyhow::bail!("failed to select candidate {pick}");
    }

    if let Some(firm) = flow.firm_mut() {
        if let Some(practice_area) = practice_area {
            let mut edit = PracticeAreaEdit::begin(firm);
            edit.set(practice_area);
            edit.save(firm);
        }
        for keyword in keywords {
            firm.toggle_keyword(keyword);
        }
    }

    let Some(firm) = flow.firm() else {
        anyhow::bail!("failed to select candidate {pick}");
    };
    println!("Running report for: {} ({})", firm.name, firm.location);
    println!("Practice area: {}", firm.practice_area);
    if !firm.keywords.is_empty() {
        println!("Keywords: {}", firm.keywords.join(", "));
    }

    let mut progress = run_report(client.clone(), firm);

    println!("\nWe're Generating Your AI Visibility Report");
    render::print_progress_steps(&progress);
    println!();
    for _ in 0..watch_secs {
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;
        progress.tick();
        println!("Elapsed: {}", progress.elapsed_label());
    }

    Ok(())
}
