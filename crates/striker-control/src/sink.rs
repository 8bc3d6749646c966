//! Where selected commands go.

use alloc::vec::Vec;
use core::convert::Infallible;

use crate::command::MotionCommand;

/// Core trait for anything that accepts motion commands.
///
/// Implementors forward commands to the actuator layer: an event dispatcher,
/// a message bus, a serial link or a recorder in tests.
pub trait CommandSink {
    /// Error raised when a command cannot be delivered.
    type Error;

    /// Deliver one command.
    fn send(&mut self, command: MotionCommand) -> Result<(), Self::Error>;
}

impl<S: CommandSink + ?Sized> CommandSink for &mut S {
    type Error = S::Error;

    fn send(&mut self, command: MotionCommand) -> Result<(), Self::Error> {
        (**self).send(command)
    }
}

/// Records every command in order.
impl CommandSink for Vec<MotionCommand> {
    type Error = Infallible;

    fn send(&mut self, command: MotionCommand) -> Result<(), Self::Error> {
        self.push(command);
        Ok(())
    }
}
