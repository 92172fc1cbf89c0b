//! `reel-match interactive`: a line-oriented session with a watchlist.

use crate::{print_bar_chart, print_recommendations, print_suggestions};
use anyhow::Result;
use colored::Colorize;
use server::{EngineError, Recommender, Session, DEFAULT_K};
use std::io::{self, BufRead, Write};
use tracing::debug;

const HELP: &str = "\
Commands:
  rec <title>      recommend movies similar to <title> (skips watchlisted titles)
  id <movie_id>    recommend by catalog movie id
  search <text>    titles containing <text>
  add <title>      add a title to the watchlist
  remove <title>   remove a title from the watchlist
  list             show the watchlist
  genres           genre distribution of the watchlist
  ratings          ratings of watchlisted movies, in order added
  help             show this message
  quit             leave";

enum Step {
    Continue,
    Quit,
}

pub fn run(recommender: Recommender) -> Result<()> {
    let mut session = Session::new();
    println!("{}", "ReelMatch interactive session".bold().blue());
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", ">".green());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        // Query failures are reported and the session keeps going
        match handle_line(&recommender, &mut session, line.trim()) {
            Ok(Step::Continue) => {}
            Ok(Step::Quit) => break,
            Err(e) => println!("{} {}", "✗".red(), e),
        }
    }

    println!("Watched {} titles this session.", session.len());
    Ok(())
}

fn handle_line(recommender: &Recommender, session: &mut Session, line: &str) -> Result<Step> {
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };
    debug!("command={:?} arg={:?}", command, arg);

    match command {
        "" => {}
        "quit" | "exit" => return Ok(Step::Quit),
        "help" => println!("{}", HELP),
        "rec" => match recommender.recommend_by_title(arg, DEFAULT_K + session.len()) {
            Ok(recs) => {
                let mut recs = session.unwatched(recs);
                recs.truncate(DEFAULT_K);
                print_recommendations(&recs);
            }
            Err(EngineError::TitleNotFound(title)) => {
                println!("{} '{}' is not in the catalog", "✗".red(), title);
                print_suggestions(recommender, arg);
            }
            Err(e) => return Err(e.into()),
        },
        "id" => {
            let movie_id = arg.parse()?;
            let recs = recommender.recommend_by_id(movie_id, DEFAULT_K + session.len())?;
            let mut recs = session.unwatched(recs);
            recs.truncate(DEFAULT_K);
            print_recommendations(&recs);
        }
        "search" => {
            for movie in recommender.search_titles(arg, 20) {
                println!("{}: {} ({})", movie.movie_id, movie.title, crate::year_label(movie.year));
            }
        }
        "add" => {
            if recommender.rows_for_title(arg).is_empty() {
                println!("{} '{}' is not in the catalog", "✗".red(), arg);
                print_suggestions(recommender, arg);
            } else if session.add(arg) {
                println!("{} added '{}'", "✓".green(), arg);
            } else {
                println!("'{}' is already on the watchlist", arg);
            }
        }
        "remove" => {
            if session.remove(arg) {
                println!("{} removed '{}'", "✓".green(), arg);
            } else {
                println!("'{}' is not on the watchlist", arg);
            }
        }
        "list" => {
            if session.is_empty() {
                println!("  watchlist is empty");
            }
            for (i, title) in session.watchlist().iter().enumerate() {
                println!("{}. {}", i + 1, title);
            }
        }
        "genres" => print_bar_chart(&session.genre_distribution(recommender.catalog()), 20),
        "ratings" => {
            let trend = session.rating_trend(recommender.catalog());
            if trend.is_empty() {
                println!("  no rated titles on the watchlist");
            }
            for (title, rating) in trend {
                let bar = "█".repeat((rating.clamp(0.0, 10.0) * 4.0).round() as usize);
                println!("{:>5.1} {} {}", rating, bar.cyan(), title);
            }
        }
        other => println!("Unknown command '{}'. Type 'help' for commands.", other),
    }
    Ok(Step::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::MovieMetadata;
    use server::Artifact;

    fn metadata(id: u32, title: &str, genres: &[&str], rating: Option<f32>) -> MovieMetadata {
        MovieMetadata {
            movie_id: id,
            title: title.to_string(),
            overview: String::new(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            keywords: vec![],
            cast: vec![],
            crew: vec![],
            year: None,
            vote_average: rating,
        }
    }

    fn recommender() -> Recommender {
        let artifact = Artifact::build(vec![
            metadata(1, "Alpha", &["Action"], Some(6.5)),
            metadata(2, "Bravo", &["Action"], Some(7.0)),
            metadata(3, "Charlie", &["Romance"], None),
        ])
        .unwrap();
        Recommender::new(artifact)
    }

    #[test]
    fn test_watchlist_commands() {
        let rec = recommender();
        let mut session = Session::new();

        handle_line(&rec, &mut session, "add Alpha").unwrap();
        handle_line(&rec, &mut session, "add Alpha").unwrap();
        handle_line(&rec, &mut session, "add Nope").unwrap();
        assert_eq!(session.watchlist(), ["Alpha".to_string()]);

        handle_line(&rec, &mut session, "remove Alpha").unwrap();
        assert!(session.is_empty());
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let rec = recommender();
        let mut session = Session::new();

        assert!(matches!(
            handle_line(&rec, &mut session, "rec Nonexistent"),
            Ok(Step::Continue)
        ));
        assert!(handle_line(&rec, &mut session, "id not-a-number").is_err());
        assert!(handle_line(&rec, &mut session, "id 999").is_err());
        assert!(matches!(
            handle_line(&rec, &mut session, "frobnicate"),
            Ok(Step::Continue)
        ));
        assert!(matches!(handle_line(&rec, &mut session, "quit"), Ok(Step::Quit)));
    }
}
