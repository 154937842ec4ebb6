use std::env;
use std::fs;
use std::process;

use euphony::{to_midi, EvalConfig, Evaluator, MidiHeader};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: euphony <input.notes> [--config <config.yaml>] [--midi <output.mid>]");
        process::exit(1);
    }

    let input_path = &args[1];
    let mut config_path: Option<&String> = None;
    let mut midi_path: Option<&String> = None;

    // Parse flags
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                config_path = Some(&args[i + 1]);
                i += 2;
            }
            "--midi" if i + 1 < args.len() => {
                midi_path = Some(&args[i + 1]);
                i += 2;
            }
            flag => {
                eprintln!("Unknown or incomplete flag: {}", flag);
                process::exit(1);
            }
        }
    }

    // Read input file
    let source = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    // Load config
    let config = match config_path {
        Some(path) => {
            let yaml = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading config '{}': {}", path, e);
                    process::exit(1);
                }
            };
            match EvalConfig::from_yaml(&yaml) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{}", e);
                    process::exit(1);
                }
            }
        }
        None => EvalConfig::default(),
    };

    // Evaluate
    let result = match Evaluator::new(config).evaluate(&source) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Evaluation error: {}", e);
            process::exit(1);
        }
    };

    println!("Music Evaluation Results:");
    println!("Total Score: {}/20", result.total_score);
    println!("Harmonic Score: {}/10", result.harmonic_score);
    println!("Duration Score: {}/5", result.duration_score);
    println!("Time Score: {}/5", result.time_score);

    // Optional MIDI output
    if let Some(path) = midi_path {
        let header = MidiHeader {
            division: config.t_ref.clamp(1, u16::MAX as i64) as u16,
            ..MidiHeader::default()
        };
        let bytes = match to_midi(&source, &header) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("MIDI conversion error: {}", e);
                process::exit(1);
            }
        };
        if let Err(e) = fs::write(path, &bytes) {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        }
        eprintln!("Wrote MIDI to {}", path);
    }
}
