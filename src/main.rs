use clap::Parser;

use pixpack::{
    cli::{Cli, Commands},
    handler::{handle_pack, handle_unpack},
    logger,
};

/// 程序的主入口点
///
/// 负责解析命令行参数、初始化日志，并根据指定的子命令（`pack` 或 `unpack`）
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    logger::init(cli.verbose);

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Pack(args) => handle_pack(args),
        Commands::Unpack(args) => handle_unpack(args),
    }
}
