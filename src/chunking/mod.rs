//! 文档分片 - 把原始文本切分为有界分片，作为逐片提炼的证据单元

/// 默认分片大小（字节预算）
pub const DEFAULT_CHUNK_SIZE: usize = 40960;
/// 默认分片重叠（字节）
pub const DEFAULT_CHUNK_OVERLAP: usize = 256;

/// 文本分片器
///
/// 按字节预算切分，切口保证落在字符边界上。断点优先级依次为
/// 空行、换行、空格，都没有则按预算硬切。相邻分片之间保留一段
/// 重叠以维持上下文连续。
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

impl TextChunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        // 预算至少容纳一个UTF-8字符（最宽4字节），否则窗口可能
        // 退化为空、切分无法前进
        let chunk_size = chunk_size.max(4);
        // 重叠必须小于分片大小，否则切分无法前进
        let chunk_overlap = chunk_overlap.min(chunk_size - 1);
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// 切分文档为有序分片序列，空文档产出空序列
    pub fn produce_chunks(&self, document: &str) -> Vec<String> {
        let text = document.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < text.len() {
            let remaining = &text[start..];
            if remaining.len() <= self.chunk_size {
                chunks.push(remaining.to_string());
                break;
            }

            let window_end = floor_char_boundary(remaining, self.chunk_size);
            let cut = find_break(&remaining[..window_end]).unwrap_or(window_end);
            chunks.push(remaining[..cut].to_string());

            let mut advance = cut.saturating_sub(self.chunk_overlap);
            if advance > 0 {
                advance = floor_char_boundary(remaining, advance);
            }
            if advance == 0 {
                advance = cut;
            }
            start += advance;
        }

        chunks
    }
}

/// 在窗口内寻找最靠后的自然断点，返回断点后的切分位置
fn find_break(window: &str) -> Option<usize> {
    if let Some(position) = window.rfind("\n\n") {
        let cut = position + 2;
        if cut < window.len() {
            return Some(cut);
        }
    }
    if let Some(position) = window.rfind('\n')
        && position + 1 < window.len()
    {
        return Some(position + 1);
    }
    if let Some(position) = window.rfind(' ')
        && position + 1 < window.len()
    {
        return Some(position + 1);
    }
    None
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

// Include tests
#[cfg(test)]
mod tests;
