mod input;
use input::{Token, Tokens};

use std::io::{BufRead, Write};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use crate::stack::Stack;

pub type Element = i32;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Command {
    Exit,
    Create,
    Push,
    Pop,
    Peek,
    Render,
}

impl TryFrom<i32> for Command {
    type Error = i32;

    fn try_from(choice: i32) -> Result<Self, Self::Error> {
        use Command::*;

        let cmd = match choice {
            0 => Exit,
            1 => Create,
            2 => Push,
            3 => Pop,
            4 => Peek,
            5 => Render,
            _ => return Err(choice),
        };

        Ok(cmd)
    }
}

/// Outcome of asking for a strictly positive count.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Count {
    Eof,
    Rejected,
    Value(usize),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive front end driving a single [`Stack`] from numbered commands.
#[derive(Debug)]
pub struct Menu<R, W> {
    input: Tokens<R>,
    out: W,
    stack: Stack<Element>,
    quiet: bool,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, out: W, quiet: bool) -> Self {
        Self {
            input: Tokens::new(input),
            out,
            stack: Stack::new(),
            quiet,
        }
    }

    /// Run until the exit command or end of input. The stack is torn down
    /// on the way out either way.
    pub fn run(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "Welcome to the Stack.")?;

        while self.step()? == Flow::Continue {}

        self.stack.teardown();
        self.out.flush()?;

        Ok(())
    }

    fn step(&mut self) -> anyhow::Result<Flow> {
        if !self.quiet {
            self.print_menu()?;
        }
        self.out.flush()?;

        let choice = match self.input.next_parsed::<i32>()? {
            Token::Eof => {
                info!("end of input, exiting");
                return Ok(Flow::Exit);
            }
            Token::Invalid(tok) => {
                debug!("rejected menu input {:?}", tok);
                self.reject("Invalid input. Please enter a valid number.")?;
                return Ok(Flow::Continue);
            }
            Token::Value(choice) => choice,
        };

        let cmd = match Command::try_from(choice) {
            Ok(cmd) => cmd,
            Err(choice) => {
                debug!("rejected menu choice {}", choice);
                writeln!(
                    self.out,
                    "Invalid choice. Please enter a number between 0 and 5."
                )?;
                return Ok(Flow::Continue);
            }
        };

        trace!("command: {:?}", cmd);

        match cmd {
            Command::Exit => Ok(Flow::Exit),
            Command::Create => self.create(),
            Command::Push => self.push(),
            Command::Pop => self.pop(),
            Command::Peek => self.peek(),
            Command::Render => self.print_stack().map(|_| Flow::Continue),
        }
    }

    fn print_menu(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "Please enter a number to choose the operation.")?;
        writeln!(self.out, "1. Create a new stack.")?;
        writeln!(self.out, "2. Push a number.")?;
        writeln!(self.out, "3. Pop a number.")?;
        writeln!(self.out, "4. Print the top element.")?;
        writeln!(self.out, "5. Print the stack.")?;
        writeln!(self.out, "0. Exit.")?;

        Ok(())
    }

    fn prompt(&mut self, text: &str) -> anyhow::Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;

        Ok(())
    }

    /// Report a rejected value and drop the rest of its line, so nothing
    /// typed after it is taken as a command.
    fn reject(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.out, "{}", message)?;
        self.input.discard_line();

        Ok(())
    }

    fn read_positive(&mut self, what: &str) -> anyhow::Result<Count> {
        let n = match self.input.next_parsed::<i64>()? {
            Token::Eof => return Ok(Count::Eof),
            Token::Value(n) if n > 0 => usize::try_from(n).ok(),
            Token::Value(_) | Token::Invalid(_) => None,
        };

        match n {
            Some(n) => Ok(Count::Value(n)),
            None => {
                debug!("rejected {}", what);
                self.reject(&format!(
                    "Invalid {}. Please enter a positive integer.",
                    what
                ))?;
                Ok(Count::Rejected)
            }
        }
    }

    fn create(&mut self) -> anyhow::Result<Flow> {
        self.prompt("Please enter the initial capacity of the stack: ")?;
        let capacity = match self.read_positive("capacity")? {
            Count::Eof => return Ok(Flow::Exit),
            Count::Rejected => return Ok(Flow::Continue),
            Count::Value(capacity) => capacity,
        };

        self.prompt("Please enter the length of elements you want to insert: ")?;
        let count = match self.read_positive("length")? {
            Count::Eof => return Ok(Flow::Exit),
            Count::Rejected => return Ok(Flow::Continue),
            Count::Value(count) => count,
        };

        if self.stack.is_initialized() {
            info!("replacing stack of length {}", self.stack.len());
        }

        if let Err(e) = self.stack.init(capacity) {
            error!("stack creation failed: {}", e);
            writeln!(self.out, "Failed to create the stack. {}", e)?;
            return Ok(Flow::Continue);
        }
        info!("created stack with capacity {}", capacity);

        writeln!(
            self.out,
            "Please enter all {} elements one by one in order.",
            count
        )?;

        let mut inserted = 0;
        while inserted < count {
            match self.input.next_parsed::<Element>()? {
                Token::Eof => return Ok(Flow::Exit),
                Token::Invalid(tok) => {
                    debug!("rejected element {:?}", tok);
                    self.reject("Invalid element. Please enter a valid integer.")?;
                }
                Token::Value(e) => {
                    if let Err(err) = self.stack.push(e) {
                        writeln!(self.out, "Push failed! {}", err)?;
                    }
                    inserted += 1;
                }
            }
        }

        self.print_stack()?;

        Ok(Flow::Continue)
    }

    fn push(&mut self) -> anyhow::Result<Flow> {
        self.prompt("Please enter an element you want to push: ")?;
        let e = match self.input.next_parsed::<Element>()? {
            Token::Eof => return Ok(Flow::Exit),
            Token::Invalid(tok) => {
                debug!("rejected element {:?}", tok);
                self.reject("Invalid element. Please enter a valid integer.")?;
                return Ok(Flow::Continue);
            }
            Token::Value(e) => e,
        };

        match self.stack.push(e) {
            Ok(()) => {
                debug!(
                    "stack length {}, capacity {}",
                    self.stack.len(),
                    self.stack.capacity()
                );
                writeln!(self.out, "Push successfully!")?
            }
            Err(err) => writeln!(self.out, "Push failed! {}", err)?,
        }
        self.print_stack()?;

        Ok(Flow::Continue)
    }

    fn pop(&mut self) -> anyhow::Result<Flow> {
        match self.stack.pop() {
            Ok(e) => writeln!(self.out, "Element {} popped successfully!", e)?,
            Err(err) => writeln!(self.out, "Pop failed. {}", err)?,
        }
        self.print_stack()?;

        Ok(Flow::Continue)
    }

    fn peek(&mut self) -> anyhow::Result<Flow> {
        // nothing on top: say whether the stack is empty or missing
        if self.stack.is_empty() {
            self.print_stack()?;
            return Ok(Flow::Continue);
        }

        match self.stack.peek() {
            Ok(e) => writeln!(self.out, "The top element is {}.", e)?,
            Err(err) => writeln!(self.out, "{}", err)?,
        }

        Ok(Flow::Continue)
    }

    fn print_stack(&mut self) -> anyhow::Result<()> {
        match self.stack.render() {
            Ok(render) => writeln!(self.out, "{}", render)?,
            Err(err) => writeln!(self.out, "{}", err)?,
        }

        Ok(())
    }
}
