//! CLI module for the grammar-analyzer REPL.
//!
//! Reads a line-oriented grammar description from stdin, reports whether it
//! is LL(1) and/or SLR(1)/CLR(1), and then lets the user pick a driver and
//! try strings against it.

use crate::error::{GrammarError, Result};
use crate::first_follow::{compute_first_sets, compute_follow_sets};
use crate::grammar::Grammar;
use crate::ll1::LLParser;
use crate::lr_parser::LrParser;
use crate::symbol::Symbol;
use crate::table::{build_clr_table, build_slr_table, Table};
use crate::token::Token;
use std::io::{self, BufRead, Write};

/// Main CLI runner.
pub fn run() -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let grammar_lines = read_grammar(&mut lines)?;
    let grammar = parse_grammar(&grammar_lines)?;

    let first_sets = compute_first_sets(&grammar);
    let follow_sets = compute_follow_sets(&grammar, &first_sets);

    let ll1 = LLParser::build(&grammar, &first_sets, &follow_sets);
    let slr1 = build_slr_table(&grammar);
    let clr1 = build_clr_table(&grammar);

    let ll1_ok = ll1.is_ok();
    let slr1_ok = slr1.is_ok();
    println!(
        "Grammar is {}LL(1) and {}SLR(1).",
        if ll1_ok { "" } else { "not " },
        if slr1_ok { "" } else { "not " },
    );

    if !ll1_ok && !slr1_ok && clr1.is_err() {
        println!("Grammar is neither LL(1), SLR(1), nor CLR(1).");
        return Ok(());
    }

    interactive_mode(&grammar, ll1.ok(), slr1.ok(), clr1.ok(), &mut lines)
}

/// Reads the grammar from input lines: first line is the production count,
/// followed by that many production lines.
fn read_grammar<R: BufRead>(lines: &mut io::Lines<R>) -> Result<Vec<String>> {
    let mut grammar_lines = Vec::new();

    let n_str = lines
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "expected production count"))??;
    let n = n_str
        .trim()
        .parse::<usize>()
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "invalid production count"))?;

    for _ in 0..n {
        let line = lines
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "expected production line"))??;
        grammar_lines.push(line);
    }

    Ok(grammar_lines)
}

/// Parses lines of the form `LHS -> sym sym | sym | <empty>` into a
/// grammar. A symbol is a nonterminal iff it appears as some line's LHS;
/// everything else is a terminal. The first line's LHS is the start symbol.
fn parse_grammar(lines: &[String]) -> Result<Grammar<()>> {
    let mut nonterminals = std::collections::HashSet::new();
    let mut rules: Vec<(String, Vec<Vec<String>>)> = Vec::new();

    for line in lines {
        let (lhs, rest) = line
            .split_once("->")
            .ok_or_else(|| GrammarError::ParseError(format!("missing '->' in line: {line}")))?;
        let lhs = lhs.trim().to_string();
        nonterminals.insert(lhs.clone());

        let alts: Vec<Vec<String>> = rest
            .split('|')
            .map(|alt| {
                alt.split_whitespace()
                    .filter(|s| *s != crate::symbol::EPSILON_NAME)
                    .map(|s| s.to_string())
                    .collect()
            })
            .collect();
        rules.push((lhs, alts));
    }

    let mut terminals = std::collections::HashSet::new();
    for (_, alts) in &rules {
        for alt in alts {
            for sym in alt {
                if !nonterminals.contains(sym) {
                    terminals.insert(sym.clone());
                }
            }
        }
    }

    let mut grammar = Grammar::new(terminals)?;
    for (lhs, alts) in &rules {
        for alt in alts {
            let rhs: Vec<Symbol> = alt
                .iter()
                .map(|s| {
                    if nonterminals.contains(s) {
                        Symbol::Nonterminal(s.clone())
                    } else {
                        Symbol::Terminal(s.clone())
                    }
                })
                .collect();
            grammar.add_production(lhs.clone(), rhs, None)?;
        }
    }
    grammar.set_start(None)?;
    Ok(grammar)
}

fn tokenize(input: &str) -> Vec<Token<()>> {
    input
        .split_whitespace()
        .map(Token::<()>::without_value)
        .collect()
}

/// Parses strings until an empty line, printing yes/no for each.
fn parse_strings<R: BufRead>(
    lines: &mut io::Lines<R>,
    accept: impl Fn(&[Token<()>]) -> bool,
) -> Result<()> {
    while let Some(Ok(line)) = lines.next() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        println!("{}", if accept(&tokenize(trimmed)) { "yes" } else { "no" });
    }
    Ok(())
}

fn lr_accepts(grammar: &Grammar<()>, table: &Table, tokens: &[Token<()>]) -> bool {
    LrParser::new(grammar, table).parse(tokens.to_vec()).is_ok()
}

fn interactive_mode<R: BufRead>(
    grammar: &Grammar<()>,
    ll1: Option<LLParser<()>>,
    slr1: Option<Table>,
    clr1: Option<Table>,
    lines: &mut io::Lines<R>,
) -> Result<()> {
    loop {
        print!("Select a parser (L: LL(1), S: SLR(1), C: CLR(1), Q: quit): ");
        io::stdout().flush()?;

        let choice = match lines.next() {
            Some(Ok(line)) => line.trim().to_uppercase(),
            Some(Err(e)) => return Err(e.into()),
            None => break,
        };

        match choice.as_str() {
            "Q" => break,
            "L" => match &ll1 {
                Some(parser) => parse_strings(lines, |toks| parser.accepts(toks))?,
                None => println!("Grammar is not LL(1)."),
            },
            "S" => match &slr1 {
                Some(table) => parse_strings(lines, |toks| lr_accepts(grammar, table, toks))?,
                None => println!("Grammar is not SLR(1)."),
            },
            "C" => match &clr1 {
                Some(table) => parse_strings(lines, |toks| lr_accepts(grammar, table, toks))?,
                None => println!("Grammar is not CLR(1)."),
            },
            _ => continue,
        }
    }

    Ok(())
}
