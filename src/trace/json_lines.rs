use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::error::Result;
use crate::net::{ChannelNotification, ChannelObserver};

/// JSON Lines 轨迹记录器；写失败只记录告警，不影响仿真。
pub struct JsonLinesTrace<W: Write> {
    out: W,
    written: u64,
    failed: bool,
}

impl JsonLinesTrace<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> JsonLinesTrace<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            written: 0,
            failed: false,
        }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, n: &ChannelNotification) -> Result<()> {
        serde_json::to_writer(&mut self.out, n)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> ChannelObserver for JsonLinesTrace<W> {
    fn on_notification(&mut self, n: &ChannelNotification) {
        if self.failed {
            return;
        }
        match self.write_line(n) {
            Ok(()) => self.written += 1,
            Err(e) => {
                warn!(error = %e, "写轨迹失败，后续记录将被跳过");
                self.failed = true;
            }
        }
    }

    fn finish(&mut self) {
        if let Err(e) = self.out.flush() {
            warn!(error = %e, "刷新轨迹文件失败");
        }
    }
}
