pub mod preview;
pub mod run;

pub type CmdResult<T> = tagsync::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident :: $func:ident) => {
        crate::output::map_cmd_result_to_json($module::$func($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (tagsync::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Run(args) => dispatch!(args, global, run::run),
        // Same pass, parameterized with the follow-on export step.
        crate::Commands::Export(args) => dispatch!(args, global, run::run_export),
        crate::Commands::Preview(args) => dispatch!(args, global, preview::run),
    }
}
