mod config;
mod error;
mod logging;
mod models;
mod operations;
mod store;

use clap::{Parser, Subcommand};
use config::{DATA_DIR_ENV, Settings};
use error::Result;
use models::category::Category;
use models::expense::format_money;
use operations::add::add_expense;
use operations::budget::{current_budget, set_budget};
use operations::dashboard::run_dashboard;
use operations::history::{EMPTY_HISTORY, spending_history};
use operations::remove::remove_last_expense;
use operations::search_by_category::search_expenses_by_category;
use operations::summary::summarize;
use std::path::PathBuf;
use std::process::ExitCode;
use store::Stores;
use store::paths::DataPaths;

#[derive(Parser)]
#[command(
    name = "dash",
    version,
    about = "Track monthly expenses against a budget"
)]
struct Cli {
    /// Directory holding Finances.csv and Budget.txt (defaults to the current directory)
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard (default)
    #[command(alias = "ui")]
    Dashboard,

    /// Record a new expense
    Add {
        name: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[arg(short, long, default_value = "Food")]
        category: Category,
    },

    /// Remove the most recent expense
    RemoveLast,

    /// Show or change the monthly budget
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Print totals, remaining budget and daily allowance
    Summary,

    /// Print the most recent expenses, newest first
    History {
        #[arg(short, long)]
        limit: Option<usize>,
        /// Only show expenses in this category
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// List the available categories
    Categories,
}

#[derive(Subcommand)]
enum BudgetCommands {
    /// Print the current monthly budget
    Show,
    /// Replace the monthly budget
    Set {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let dashboard = matches!(cli.command, None | Some(Commands::Dashboard));
    logging::init_tracing(cli.verbose, dashboard);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::default();
    let paths = DataPaths::resolve(cli.data_dir, &settings)?;
    let stores = Stores::open(paths, &settings);
    tracing::info!(
        data_dir = %stores.paths.base_dir().display(),
        expenses = %stores.expenses.path().display(),
        budget = %stores.budget.path().display(),
        "using data files"
    );

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => run_dashboard(stores, &settings)?,
        Commands::Add {
            name,
            amount,
            category,
        } => {
            stores.paths.ensure_base_dir()?;
            let expense = add_expense(&stores.expenses, &name, &amount, category)?;
            println!("Expense added: {}", expense);
        }
        Commands::RemoveLast => match remove_last_expense(&stores.expenses)? {
            Some(expense) => println!("Removed {}", expense),
            None => println!("Last expense removed."),
        },
        Commands::Budget(BudgetCommands::Show) => {
            let budget = current_budget(&stores.budget);
            println!("Monthly Budget: ${}", format_money(budget.amount));
        }
        Commands::Budget(BudgetCommands::Set { amount }) => {
            stores.paths.ensure_base_dir()?;
            let budget = set_budget(&stores.budget, &amount)?;
            println!("Budget updated: ${}", format_money(budget.amount));
        }
        Commands::Summary => {
            let budget = current_budget(&stores.budget);
            let expenses = stores.expenses.read_all()?;
            let today = chrono::Local::now().date_naive();
            println!("Monthly Budget: ${}", format_money(budget.amount));
            for line in summarize(&expenses, budget, today)?.lines() {
                println!("{}", line);
            }
        }
        Commands::History { limit, category } => {
            let limit = limit.unwrap_or(settings.history_limit);
            match category {
                Some(category) => {
                    let expenses = stores.expenses.read_all()?;
                    let matching = search_expenses_by_category(category, &expenses);
                    if matching.is_empty() {
                        println!("No expenses found for category: {}", category);
                    }
                    for expense in matching.iter().rev().take(limit) {
                        println!("{}", expense.to_line());
                    }
                }
                None => {
                    let history = spending_history(&stores.expenses, limit)?;
                    if history.is_empty() {
                        println!("{}", EMPTY_HISTORY);
                    }
                    for line in history {
                        println!("{}", line);
                    }
                }
            }
        }
        Commands::Categories => {
            for category in Category::ALL {
                println!("{}", category);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_dashboard() {
        let cli = Cli::try_parse_from(["dash"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_add_with_category() {
        let cli = Cli::try_parse_from(["dash", "add", "Bus", "2", "--category", "transportation"])
            .unwrap();
        match cli.command {
            Some(Commands::Add {
                name,
                amount,
                category,
            }) => {
                assert_eq!(name, "Bus");
                assert_eq!(amount, "2");
                assert_eq!(category, Category::Transportation);
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn test_parse_add_rejects_unknown_category() {
        let result = Cli::try_parse_from(["dash", "add", "Gift", "5", "-c", "Gifts"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_add_then_remove_through_run() {
        let dir = tempfile::TempDir::new().unwrap();
        let data_dir = dir.path().to_str().unwrap();

        let add = Cli::try_parse_from(["dash", "--data-dir", data_dir, "add", "Coffee", "4.5"])
            .unwrap();
        run(add).unwrap();
        let add = Cli::try_parse_from(["dash", "--data-dir", data_dir, "add", "Cab", "12"]).unwrap();
        run(add).unwrap();
        let remove = Cli::try_parse_from(["dash", "--data-dir", data_dir, "remove-last"]).unwrap();
        run(remove).unwrap();

        let contents = std::fs::read_to_string(dir.path().join("Finances.csv")).unwrap();
        assert_eq!(contents, "Coffee, 4.50, Food\n");
    }

    #[test]
    fn test_run_budget_set_rejects_negative() {
        let dir = tempfile::TempDir::new().unwrap();
        let data_dir = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["dash", "--data-dir", data_dir, "budget", "set", "-20"])
            .unwrap();
        let err = run(cli).unwrap_err();
        assert_eq!(err.to_string(), "Invalid budget amount");
    }
}
