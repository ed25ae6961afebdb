mod channel;
mod mobility;
mod simulator;

use std::sync::{Arc, Mutex};

use crate::net::{ChannelNotification, ChannelObserver};

/// 把通知复制到共享向量里的测试监听者
#[derive(Clone, Default)]
pub(crate) struct Capture(pub(crate) Arc<Mutex<Vec<ChannelNotification>>>);

impl Capture {
    pub(crate) fn take(&self) -> Vec<ChannelNotification> {
        std::mem::take(&mut *self.0.lock().expect("capture lock"))
    }
}

impl ChannelObserver for Capture {
    fn on_notification(&mut self, n: &ChannelNotification) {
        self.0.lock().expect("capture lock").push(n.clone());
    }
}
