use std::io::BufRead;

use super::{PlanningProblem, Section};
use crate::{
    misc::log::targets,
    types::err::{self},
};

/// The header of a section, `<tag> cnf <literals> <clauses>`.
struct Header {
    tag: char,
    literals: u32,
    clauses: usize,
}

fn read_header(line: &str, line_number: usize) -> Result<Header, err::ParseError> {
    let mut details = line.split_whitespace();

    let mut tag_chars = details.next().unwrap_or_default().chars();
    let tag = match (tag_chars.next(), tag_chars.next()) {
        (Some(tag), None) => tag,
        _ => return Err(err::ParseError::Header(line_number)),
    };

    if details.next() != Some("cnf") {
        return Err(err::ParseError::Header(line_number));
    }

    let literals = match details.next().map(str::parse::<u32>) {
        Some(Ok(count)) => count,
        _ => return Err(err::ParseError::Header(line_number)),
    };

    let clauses = match details.next().map(str::parse::<usize>) {
        Some(Ok(count)) => count,
        _ => return Err(err::ParseError::Header(line_number)),
    };

    match details.next() {
        None => Ok(Header {
            tag,
            literals,
            clauses,
        }),
        Some(_) => Err(err::ParseError::Header(line_number)),
    }
}

impl PlanningProblem {
    /// Reads a planning problem.
    ///
    /// The input is four sections, in the order initial, invariant, goal, transfer.
    /// Each section is introduced by a header `<tag> cnf <literals> <clauses>`, with tags `i`, `u`, `g`, and `t`, followed by a whitespace separated sequence of literals where 0 terminates a clause.
    /// The transfer section spans two states, and so declares twice the literals of the other sections.
    ///
    /// Lines starting with `c` are comments.
    ///
    /// ```rust
    /// # use incplan::problem::PlanningProblem;
    /// let input = b"c a single bit
    /// i cnf 1 1
    /// -1 0
    /// u cnf 1 0
    /// g cnf 1 1
    /// 1 0
    /// t cnf 2 1
    /// -1 2 0
    /// ";
    ///
    /// let problem = PlanningProblem::read(&input[..]).unwrap();
    /// assert_eq!(problem.literals_per_step(), 1);
    /// assert_eq!(problem.transfer(), &[-1, 2, 0]);
    /// ```
    pub fn read(reader: impl BufRead) -> Result<Self, err::ParseError> {
        let mut literals_per_step: Option<u32> = None;
        let mut templates: [Vec<i32>; 4] = Default::default();
        let mut declared_clauses = [0_usize; 4];
        let mut current: Option<usize> = None;

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = match line {
                Ok(line) => line,
                Err(_) => return Err(err::ParseError::Line(line_number)),
            };
            let line = line.trim();

            match line.chars().next() {
                None | Some('c') => continue,

                Some(character) if character.is_ascii_alphabetic() => {
                    let header = read_header(line, line_number)?;

                    let next = current.map_or(0, |section| section + 1);
                    let Some(expected) = Section::ORDER.get(next) else {
                        return Err(err::ParseError::Header(line_number));
                    };
                    if header.tag != expected.tag() {
                        return Err(err::ParseError::UnexpectedSection {
                            line: line_number,
                            expected: expected.tag(),
                            found: header.tag,
                        });
                    }

                    let width = *literals_per_step.get_or_insert(match expected {
                        Section::Transfer => header.literals / 2,
                        _ => header.literals,
                    });
                    let expected_literals = match expected {
                        Section::Transfer => 2 * width,
                        _ => width,
                    };
                    if header.literals != expected_literals {
                        return Err(err::ParseError::LiteralCount {
                            line: line_number,
                            expected: expected_literals,
                            found: header.literals,
                        });
                    }

                    declared_clauses[next] = header.clauses;
                    current = Some(next);
                }

                Some(_) => {
                    let Some(section) = current else {
                        return Err(err::ParseError::Header(line_number));
                    };
                    for item in line.split_whitespace() {
                        match item.parse::<i32>() {
                            Ok(literal) => templates[section].push(literal),
                            Err(_) => return Err(err::ParseError::Literal(line_number)),
                        }
                    }
                }
            }
        }

        let Some(literals_per_step) = literals_per_step else {
            return Err(err::ParseError::Empty);
        };

        if let Some(missing) = Section::ORDER.get(current.map_or(0, |section| section + 1)) {
            return Err(err::ParseError::MissingSection(missing.tag()));
        }

        for (section, template) in Section::ORDER.iter().zip(&templates) {
            let found = template.iter().filter(|literal| **literal == 0).count();
            let declared = declared_clauses[*section as usize];
            if found != declared {
                log::warn!(target: targets::PARSE, "Section {} declares {declared} clauses, though {found} were read.", section.tag());
            }
        }

        let [initial, invariant, goal, transfer] = templates;
        log::info!(target: targets::PARSE, "Read a problem with {literals_per_step} literals per step.");
        PlanningProblem::from_templates(literals_per_step, initial, invariant, goal, transfer)
    }
}
