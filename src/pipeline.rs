use crate::command::{CommandDescriptor, CommandExecutor, dispatch};
use crate::error::ExecuteError;
use crate::stream::Stream;
use std::io::BufRead;

/// Runs the stages of a pipeline one after another.
///
/// Stage *i*'s output stream is moved into stage *i+1* as its input; the first stage
/// gets an empty stream. The runner owns the console that `cat` and `wc` fall back to
/// when they have neither piped input nor a file argument.
pub struct PipelineRunner<R> {
    console: R,
}

impl<R: BufRead> PipelineRunner<R> {
    pub fn new(console: R) -> Self {
        Self { console }
    }

    /// Dispatches every descriptor and runs the resulting pipeline.
    ///
    /// Returns the last stage's output followed by a single newline. The first failing
    /// stage aborts the run; its error is returned and later stages never start.
    pub fn run(&mut self, pipeline: Vec<CommandDescriptor>) -> Result<String, ExecuteError> {
        let executors: Vec<_> = pipeline.into_iter().map(dispatch).collect();
        self.run_executors(executors)
    }

    /// Same as [`run`](Self::run) for already constructed executors.
    pub fn run_executors<E, I>(&mut self, executors: I) -> Result<String, ExecuteError>
    where
        E: CommandExecutor,
        I: IntoIterator<Item = E>,
    {
        let mut stream = Stream::new();
        for (stage, executor) in executors.into_iter().enumerate() {
            let name = executor.descriptor().name().to_owned();
            trace!(stage, command = %name, "starting stage");
            stream = executor
                .execute(stream, &mut self.console)
                .inspect_err(|e| debug!(stage, command = %name, error = %e, "stage failed"))?;
            trace!(stage, command = %name, bytes = stream.as_str().len(), "stage finished");
        }

        let mut result = stream.into_string();
        result.push('\n');
        Ok(result)
    }
}
