/*
 * Copyright (C) 2022 taylor.fish <contact@taylor.fish>
 *
 * This file is part of Base41.
 *
 * Base41 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Base41 is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with Base41. If not, see <https://www.gnu.org/licenses/>.
 */

use std::ffi::OsStr;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, stdin, stdout, Read, Write};
use std::path::Path;
use std::process::exit;

const USAGE: &str = "\
Usage: base41 [options] [file]

Encodes or decodes Base41 data from [file] and writes the result to standard
output. If [file] is missing or \"-\", the data is read from standard input.
The input to encode must contain an even number of bytes.

Options:
  -d --decode             Decode data instead of encoding
  -i --ignore-whitespace  When decoding, ignore whitespace in the input
  -h --help               Show this help message
  -v --version            Show program version
";

/// Prints `error: <msg>` and exits with status 1.
fn fail(msg: impl Display) -> ! {
    eprintln!("error: {}", msg);
    if cfg!(feature = "cli-panic") {
        panic!("error: {}", msg);
    }
    exit(1);
}

trait OrFail<T> {
    fn or_fail(self, what: &str) -> T;
}

impl<T> OrFail<T> for io::Result<T> {
    fn or_fail(self, what: &str) -> T {
        self.unwrap_or_else(|e| fail(format_args!("{}: {}", what, e)))
    }
}

fn usage_error(msg: impl Display) -> ! {
    fail(format_args!(
        "{}\nSee `base41 --help` for usage information.",
        msg,
    ))
}

enum Flag {
    Decode,
    IgnoreWhitespace,
    Help,
    Version,
}

impl Flag {
    fn long(name: &str) -> Option<Self> {
        Some(match name {
            "decode" => Self::Decode,
            "ignore-whitespace" => Self::IgnoreWhitespace,
            "help" => Self::Help,
            "version" => Self::Version,
            _ => return None,
        })
    }

    fn short(c: char) -> Option<Self> {
        Some(match c {
            'd' => Self::Decode,
            'i' => Self::IgnoreWhitespace,
            'h' => Self::Help,
            'v' => Self::Version,
            _ => return None,
        })
    }
}

#[derive(Clone, Copy)]
enum Input<'a> {
    Stdin,
    File(&'a Path),
}

struct Options<'a> {
    decode: bool,
    ignore_whitespace: bool,
    input: Option<Input<'a>>,
}

impl<'a> Options<'a> {
    fn apply(&mut self, flag: Flag) {
        match flag {
            Flag::Decode => self.decode = true,
            Flag::IgnoreWhitespace => self.ignore_whitespace = true,
            Flag::Help => {
                print!("{}", USAGE);
                exit(0);
            }
            Flag::Version => {
                println!("{}", env!("CARGO_PKG_VERSION"));
                exit(0);
            }
        }
    }

    /// "-" always means standard input, even after "--".
    fn set_input(&mut self, arg: &'a OsStr) {
        let input = if arg == "-" {
            Input::Stdin
        } else {
            Input::File(Path::new(arg))
        };
        if self.input.replace(input).is_some() {
            usage_error(format_args!(
                "unexpected argument: {}",
                arg.to_string_lossy(),
            ));
        }
    }
}

fn parse_args<'a, Args>(args: Args) -> Options<'a>
where
    Args: IntoIterator<Item = &'a OsStr>,
{
    let mut options = Options {
        decode: false,
        ignore_whitespace: false,
        input: None,
    };
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let astr = arg.to_string_lossy();
        if astr == "--" {
            args.by_ref().for_each(|a| options.set_input(a));
        } else if let Some(name) = astr.strip_prefix("--") {
            let flag = Flag::long(name).unwrap_or_else(|| {
                usage_error(format_args!("unrecognized option: --{}", name))
            });
            options.apply(flag);
        } else if astr.len() > 1 && astr.starts_with('-') {
            for c in astr.chars().skip(1) {
                let flag = Flag::short(c).unwrap_or_else(|| {
                    usage_error(format_args!("unrecognized option: -{}", c))
                });
                options.apply(flag);
            }
        } else {
            options.set_input(arg);
        }
    }
    options
}

fn encode(input: &[u8]) -> Vec<u8> {
    match base41::encode_to_bytes(input) {
        Ok(encoder) => encoder.collect(),
        Err(e) => fail(format_args!(
            "cannot encode {} bytes: {}",
            input.len(),
            e,
        )),
    }
}

fn decode(mut input: Vec<u8>, ignore_whitespace: bool) -> Vec<u8> {
    if ignore_whitespace {
        input.retain(|b| !b.is_ascii_whitespace());
    }
    base41::decode_bytes(&input)
        .and_then(|decoder| decoder.collect())
        .unwrap_or_else(|e| {
            fail(format_args!("input is not valid base-41 data: {}", e))
        })
}

fn main() {
    let args: Vec<_> = std::env::args_os().skip(1).collect();
    let options = parse_args(args.iter().map(|s| s.as_os_str()));

    let mut input = Vec::new();
    let read = match options.input.unwrap_or(Input::Stdin) {
        Input::Stdin => stdin().read_to_end(&mut input),
        Input::File(path) => File::open(path)
            .unwrap_or_else(|e| {
                fail(format_args!(
                    "could not open file '{}': {}",
                    path.display(),
                    e,
                ))
            })
            .read_to_end(&mut input),
    };
    read.or_fail("could not read input");

    // Nothing is written unless the whole input converts.
    let output = if options.decode {
        decode(input, options.ignore_whitespace)
    } else {
        encode(&input)
    };
    let mut out = stdout();
    out.write_all(&output)
        .and_then(|_| out.flush())
        .or_fail("could not write to standard output");
}
