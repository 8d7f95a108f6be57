//! The command stream driver.
//!
//! The input is a number `n`, followed by `n` pairs of an opcode and a value:
//!
//! | opcode | command      | output                  |
//! |--------|--------------|-------------------------|
//! | 1      | insert value | -                       |
//! | 2      | delete value | -                       |
//! | 3      | rank(value)  | the rank                |
//! | 4      | kth(value)   | the key, or the error   |
//! | 5      | prev(value)  | the key, or the error   |
//! | 6      | next(value)  | the key, or the error   |
//!
//! A failing `kth`, `prev` or `next` stops the whole stream.

use crate::error::{DriverError, TreeError};
use crate::trees::fhq_treap::FhqTreap;
use crate::trees::splay::SplayTree;
use crate::trees::treap::Treap;
use crate::trees::OrderStatisticTree;
use std::convert::TryFrom;
use std::io::{Read, Write};
use std::str::FromStr;
use text_io::try_read;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Command {
    Insert(i64),
    Delete(i64),
    Rank(i64),
    Kth(i64),
    Prev(i64),
    Next(i64),
}

impl Command {
    pub fn from_opcode(opcode: i64, value: i64) -> Result<Command, DriverError> {
        use Command::*;
        let command = match opcode {
            1 => Insert(value),
            2 => Delete(value),
            3 => Rank(value),
            4 => Kth(value),
            5 => Prev(value),
            6 => Next(value),
            _ => return Err(DriverError::UnknownOpcode(opcode)),
        };
        Ok(command)
    }
}

/// Which tree runs the commands.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Engine {
    Splay,
    Treap,
    Fhq,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::Splay
    }
}

impl FromStr for Engine {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "splay" => Ok(Engine::Splay),
            "treap" => Ok(Engine::Treap),
            "fhq" => Ok(Engine::Fhq),
            _ => Err(DriverError::UnknownEngine(s.to_string())),
        }
    }
}

fn next_number<I: Iterator<Item = u8>>(input: &mut I) -> Result<i64, DriverError> {
    let mut input = input;
    let res: Result<i64, text_io::Error> = try_read!("{}", input);
    res.map_err(|err| DriverError::Parse(format!("{:?}", err)))
}

/// Reads the whole command stream.
pub fn parse_commands<I: Iterator<Item = u8>>(mut input: I) -> Result<Vec<Command>, DriverError> {
    let n = next_number(&mut input)?;
    let n = usize::try_from(n)
        .map_err(|_| DriverError::Parse(format!("negative command count {}", n)))?;
    let mut commands = Vec::with_capacity(std::cmp::min(n, 1 << 16));
    for _ in 0..n {
        let opcode = next_number(&mut input)?;
        let value = next_number(&mut input)?;
        commands.push(Command::from_opcode(opcode, value)?);
    }
    Ok(commands)
}

/// Reads `reader` to its end, then parses the command stream from it.
/// Read failures are reported as I/O errors, not as malformed input.
pub fn read_commands<R: Read>(mut reader: R) -> Result<Vec<Command>, DriverError> {
    let mut buf = vec![];
    reader.read_to_end(&mut buf)?;
    parse_commands(buf.into_iter())
}

fn report<W: Write>(out: &mut W, res: Result<i64, TreeError>) -> Result<(), DriverError> {
    match res {
        Ok(key) => {
            writeln!(out, "{}", key)?;
            Ok(())
        }
        Err(err) => {
            writeln!(out, "{}", err)?;
            Err(err.into())
        }
    }
}

/// Runs the commands on `tree`, writing one line for every query.
/// On the first failing query, writes the error's message and returns the error.
pub fn run<T, W>(tree: &mut T, commands: &[Command], out: &mut W) -> Result<(), DriverError>
where
    T: OrderStatisticTree<i64>,
    W: Write,
{
    for command in commands {
        match *command {
            Command::Insert(key) => tree.insert(key),
            Command::Delete(key) => tree.delete(key),
            Command::Rank(key) => writeln!(out, "{}", tree.rank(key))?,
            Command::Kth(k) => {
                let res = u32::try_from(k)
                    .map_err(|_| TreeError::OutOfRange)
                    .and_then(|k| tree.kth(k));
                report(out, res)?
            }
            Command::Prev(key) => report(out, tree.prev(key))?,
            Command::Next(key) => report(out, tree.next(key))?,
        }
    }
    Ok(())
}

/// Runs the commands on a fresh tree of the given engine.
pub fn run_engine<W: Write>(
    engine: Engine,
    commands: &[Command],
    out: &mut W,
) -> Result<(), DriverError> {
    match engine {
        Engine::Splay => run(&mut SplayTree::<i64>::new(), commands, out),
        Engine::Treap => run(&mut Treap::<i64>::new(), commands, out),
        Engine::Fhq => run(&mut FhqTreap::<i64>::new(), commands, out),
    }
}
