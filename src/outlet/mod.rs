//! 报告落盘

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::Path;

/// 保存最终报告到磁盘
pub fn save(output_path: &Path, objective: &str, report: &str) -> Result<()> {
    println!("\n🖊️ 报告存储中...");

    // 确保父目录存在
    if let Some(parent_dir) = output_path.parent()
        && !parent_dir.as_os_str().is_empty()
        && !parent_dir.exists()
    {
        fs::create_dir_all(parent_dir)
            .context(format!("Failed to create output dir: {:?}", parent_dir))?;
    }

    let document = format!(
        "{}\n\n---\n\n> Objective: {}\n>\n> Generated at {} by Prism (deepreport-rs)\n",
        report.trim_end(),
        objective,
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );

    fs::write(output_path, document)
        .context(format!("Failed to write report: {:?}", output_path))?;

    println!("💾 报告保存完成: {}", output_path.display());
    Ok(())
}
