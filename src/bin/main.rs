use boggle_core::{
    Board, Coord, DiceSet, GameEngine, Result, SolveResult, SolverConfig,
};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, Stylize};
use crossterm::terminal::{Clear, ClearType};
use std::io::{stdin, stdout, Stdout, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_DICTIONARY_PATH: &str = "words.txt";
const DEFAULT_SNAPSHOT_PATH: &str = "target/lexicon.bin";
const WORD_LIST_PREVIEW: usize = 40;

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var_os(var)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// One lowercase token per non-empty line. Malformed tokens are left for the
/// lexicon to skip.
fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect())
}

fn load_config() -> Result<SolverConfig> {
    match std::env::var_os("BOGGLE_CONFIG") {
        Some(path) => SolverConfig::load(path),
        None => Ok(SolverConfig::default()),
    }
}

/// What the board view is currently highlighting.
enum View {
    Heatmap,
    Path(Vec<Coord>),
    Hidden,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let dict_path = env_path("BOGGLE_DICT", DEFAULT_DICTIONARY_PATH);
    let snapshot_path = env_path("BOGGLE_SNAPSHOT", DEFAULT_SNAPSHOT_PATH);
    let engine = GameEngine::from_snapshot_or_words(
        &snapshot_path,
        || read_word_list(&dict_path),
        load_config()?,
    )?;

    let mut dice = DiceSet::standard();
    let mut rng = rand::rng();
    let mut board = dice.deal(&mut rng)?;
    let mut result = engine.solve(&board);
    let mut view = View::Heatmap;
    let mut status = String::new();
    let mut out = stdout();

    loop {
        print_ui(&mut out, &board, &result, &view, &status)?;
        status.clear();

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let parts: Vec<&str> = input.split_whitespace().collect();
        let command = parts.first().copied().unwrap_or("");

        let mutated = match command {
            "exit" | "quit" => break,
            "shuffle" => {
                board = dice.deal(&mut rng)?;
                true
            }
            "reroll" => match parse_coords::<1>(&parts[1..]) {
                Ok([coord]) => board.reroll(coord, &mut rng).map(|_| true).unwrap_or_else(|e| {
                    status = e.to_string();
                    false
                }),
                Err(e) => {
                    status = e;
                    false
                }
            },
            "swap" => match parse_coords::<2>(&parts[1..]) {
                Ok([a, b]) => board.swap(a, b).map(|_| true).unwrap_or_else(|e| {
                    status = e.to_string();
                    false
                }),
                Err(e) => {
                    status = e;
                    false
                }
            },
            "dice" => match parts.get(1).map(|path| DiceSet::load(path)) {
                Some(Ok(edited)) => {
                    dice = edited;
                    board = dice.deal(&mut rng)?;
                    status = "Dice replaced and re-dealt.".to_string();
                    true
                }
                Some(Err(e)) => {
                    status = e.to_string();
                    false
                }
                None => {
                    status = "Usage: dice <file>, one die per line, faces comma-separated.".to_string();
                    false
                }
            },
            "hide" => {
                view = match view {
                    View::Hidden => View::Heatmap,
                    _ => View::Hidden,
                };
                false
            }
            "words" => {
                view = View::Heatmap;
                false
            }
            "path" => {
                match parts.get(1).and_then(|w| result.find(&w.to_lowercase())) {
                    Some(found) => view = View::Path(found.representative().to_vec()),
                    None => status = "Word not on this board.".to_string(),
                }
                false
            }
            "json" => {
                let json = serde_json::to_string_pretty(&result)?;
                println!("{}", json);
                println!("\nPress [Enter] to continue.");
                stdin().read_line(&mut String::new())?;
                false
            }
            "" => false,
            other => {
                status = format!("Unknown command '{}'.", other);
                false
            }
        };

        if mutated {
            result = engine.solve(&board);
            if !matches!(view, View::Hidden) {
                view = View::Heatmap;
            }
        }
    }

    println!("\nBye.");
    Ok(())
}

fn parse_coords<const N: usize>(args: &[&str]) -> std::result::Result<[Coord; N], String> {
    let numbers: Vec<usize> = args.iter().filter_map(|s| s.parse().ok()).collect();
    if numbers.len() != N * 2 || args.len() != N * 2 {
        return Err(format!("Expected {} row/col pairs.", N));
    }
    let mut coords = [Coord::new(0, 0); N];
    for (i, coord) in coords.iter_mut().enumerate() {
        *coord = Coord::new(numbers[i * 2], numbers[i * 2 + 1]);
    }
    Ok(coords)
}

fn heat_color(intensity: f32) -> Color {
    let level = (intensity.clamp(0.0, 1.0) * 200.0) as u8;
    Color::Rgb { r: 40 + level, g: 40, b: 40 }
}

fn print_board(out: &mut Stdout, board: &Board, result: &SolveResult, view: &View) -> Result<()> {
    let heatmap = result.heatmap();
    for row in 0..boggle_core::GRID_SIZE {
        execute!(out, Print("  "))?;
        for col in 0..boggle_core::GRID_SIZE {
            let coord = Coord::new(row, col);
            let letter = board.letter_at(coord).to_ascii_uppercase();
            let (bg, label) = match view {
                View::Hidden => (Color::DarkGrey, " ? ".to_string()),
                View::Heatmap => (heat_color(heatmap.intensity(coord)), format!(" {} ", letter)),
                View::Path(path) => match path.iter().position(|&c| c == coord) {
                    Some(step) => (Color::DarkGreen, format!("{}{:<2}", letter, step + 1)),
                    None => (Color::Black, format!(" {} ", letter)),
                },
            };
            execute!(out, SetBackgroundColor(bg), Print(label), ResetColor, Print(" "))?;
        }
        execute!(out, Print("\n"))?;
    }
    Ok(())
}

fn print_ui(
    out: &mut Stdout,
    board: &Board,
    result: &SolveResult,
    view: &View,
    status: &str,
) -> Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    println!("{}", "Boggle Engine".bold());
    println!("---------------------------------------------------------------");
    println!("Commands: shuffle | reroll r c | swap r1 c1 r2 c2 | path <word>");
    println!("          dice <file> | words | hide | json | exit\n");

    print_board(out, board, result, view)?;

    let heatmap = result.heatmap();
    println!(
        "\n{} words, {} paths, busiest cell used {} times",
        result.len(),
        result.total_occurrences(),
        heatmap.max()
    );

    if !matches!(view, View::Hidden) {
        for entry in result.display_entries().iter().take(WORD_LIST_PREVIEW) {
            println!("  {:<12} x{}", entry.word, entry.count);
        }
        if result.len() > WORD_LIST_PREVIEW {
            println!("  ... and {} more", result.len() - WORD_LIST_PREVIEW);
        }
    }

    if !status.is_empty() {
        println!("\n{}", status.yellow());
    }
    print!("\n> ");
    out.flush()?;
    Ok(())
}
