//! # 美化输出工具
//!
//! 统一的终端输出样式。库函数本身不打印，只有 `commands/` 调用这里。
//!
//! ## 依赖关系
//! - 被 `main.rs` 和所有 `commands/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;

pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印转换消息 `from -> to`
pub fn print_conversion(from: &str, to: &str) {
    println!(
        "{} {} {} {}",
        "[OK]".green().bold(),
        from.dimmed(),
        "->".cyan(),
        to
    );
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}
