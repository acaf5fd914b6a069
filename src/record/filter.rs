//! 设备过滤器

/// 输入设备节点的路径前缀
pub const INPUT_DEVICE_PREFIX: &str = "/dev/input/event";

/// 录制时的设备过滤条件，会话开始时给定，之后不变。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeviceFilter {
    /// 不过滤
    #[default]
    Any,
    /// 只保留这个设备路径的事件
    Device(String),
}

impl DeviceFilter {
    /// `-n<index>` 对应 `/dev/input/event<index>`
    pub fn from_index(index: Option<u32>) -> Self {
        match index {
            Some(n) => DeviceFilter::Device(format!("{INPUT_DEVICE_PREFIX}{n}")),
            None => DeviceFilter::Any,
        }
    }

    pub fn matches(&self, device: &str) -> bool {
        match self {
            DeviceFilter::Any => true,
            DeviceFilter::Device(path) => path == device,
        }
    }
}
