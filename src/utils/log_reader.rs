//! 日志行读取
//!
//! 普通文件与 `.gz` 文件统一暴露为惰性的行迭代器。文件句柄归迭代器所有，
//! 迭代器被 drop（包括提前中止）时即关闭。

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::{Compression, LogFileInfo};

/// 行迭代器：去掉行尾的 `\n` / `\r\n`，非法 UTF-8 按替换字符处理
pub struct LogLines<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: BufRead> LogLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::with_capacity(512),
        }
    }
}

impl<R: BufRead> Iterator for LogLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                if self.buffer.last() == Some(&b'\n') {
                    self.buffer.pop();
                    if self.buffer.last() == Some(&b'\r') {
                        self.buffer.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buffer).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// 打开日志文件，`.gz` 透明解压
pub fn open_log_lines(
    path: &Path,
    compression: Compression,
) -> Result<LogLines<Box<dyn BufRead>>> {
    let file = File::open(path).map_err(|e| {
        AppError::io_error(
            format!("Can not open the log file: {}", e),
            Some(path.to_path_buf()),
        )
    })?;

    let reader: Box<dyn BufRead> = match compression {
        Compression::Plain => Box::new(BufReader::new(file)),
        Compression::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(BufReader::new(
            file,
        )))),
    };
    debug!(path = %path.display(), ?compression, "log file opened");

    Ok(LogLines::new(reader))
}

/// 按日志信息打开
pub fn open_log(info: &LogFileInfo) -> Result<LogLines<Box<dyn BufRead>>> {
    open_log_lines(&info.path, info.compression)
}
