pub type CmdResult<T> = funcpack::Result<(T, i32)>;

pub mod import;
pub mod include;
