use std::process;

use brew_toolbox::{app, cli::Cli, logging};
use clap::Parser;

/// 프로그램의 엔트리 포인트. 인자를 해석하고 로깅을 초기화한 뒤 명령을 실행한다.
fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = app::run(cli) {
        eprintln!("오류: {err}");
        process::exit(1);
    }
}
