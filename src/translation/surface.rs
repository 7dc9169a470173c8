//! 外部翻译面
//!
//! 翻译面是个黑盒：它异步地改写容器内容，没有完成回调。这里
//! 提供就绪判定、观察去抖的冷却闸，以及接受译文前的标记清理
//! （翻译面会往内容里塞进度条、横幅和 `font` 包裹元素）。

use std::time::{Duration, Instant};

use markup5ever_rcdom::{Handle, NodeData};

use crate::parsers::html::dom::{fragment_root, get_node_attr, get_node_name, parse_fragment};
use crate::parsers::html::serializer::inner_html;
use crate::translation::config::SurfaceConfig;

/// 翻译面遗留的部件类名，命中即整棵移除
const SURFACE_ARTIFACT_CLASSES: &[&str] = &[
    "goog-te-spinner-pos",
    "goog-te-banner-frame",
    "skiptranslate",
    "goog-te-banner",
];

/// 容器内容是否已经就绪
///
/// 就绪信号：内容非空，且与源文本不同。
pub fn translation_ready(source: &str, candidate: &str) -> bool {
    let candidate = candidate.trim();
    !candidate.is_empty() && candidate != source.trim()
}

/// 清理翻译面产出的标记
///
/// 移除部件遗留元素，解开 `font` 包裹标签（保留内容）。纯文本
/// 原样返回。
pub fn sanitize_surface_markup(markup: &str) -> String {
    if !markup.contains('<') {
        return markup.to_string();
    }

    let dom = parse_fragment(markup);
    let root = fragment_root(&dom);
    sanitize_node(&root);
    inner_html(&root)
}

fn sanitize_node(node: &Handle) {
    let children: Vec<Handle> = node.children.borrow().iter().cloned().collect();

    for child in children {
        if !matches!(child.data, NodeData::Element { .. }) {
            continue;
        }

        if has_artifact_class(&child) {
            remove_child(node, &child);
            continue;
        }

        // 先清理内部再解包，嵌套的包裹元素逐层展开
        sanitize_node(&child);

        if is_wrapper_font(&child) {
            unwrap_child(node, &child);
        }
    }
}

fn has_artifact_class(node: &Handle) -> bool {
    match get_node_attr(node, "class") {
        Some(classes) => classes
            .split_whitespace()
            .any(|class| SURFACE_ARTIFACT_CLASSES.contains(&class)),
        None => false,
    }
}

fn is_wrapper_font(node: &Handle) -> bool {
    if get_node_name(node) != Some("font") {
        return false;
    }
    if get_node_attr(node, "dir").as_deref() == Some("auto") {
        return true;
    }
    get_node_attr(node, "style")
        .map(|style| style.contains("vertical-align: inherit"))
        .unwrap_or(false)
}

fn remove_child(parent: &Handle, child: &Handle) {
    let mut children = parent.children.borrow_mut();
    children.retain(|node| !std::rc::Rc::ptr_eq(node, child));
}

fn unwrap_child(parent: &Handle, child: &Handle) {
    let position = {
        let children = parent.children.borrow();
        children.iter().position(|node| std::rc::Rc::ptr_eq(node, child))
    };
    let position = match position {
        Some(position) => position,
        None => return,
    };

    let grandchildren: Vec<Handle> = child.children.borrow_mut().drain(..).collect();

    let mut children = parent.children.borrow_mut();
    children.remove(position);
    for (offset, grandchild) in grandchildren.into_iter().enumerate() {
        grandchild.parent.set(Some(std::rc::Rc::downgrade(parent)));
        children.insert(position + offset, grandchild);
    }
}

/// 观察去抖的冷却闸
///
/// 翻译面改写内容是渐进的，每次观察到变化就重置冷却窗口，
/// 窗口静默期满后才允许提取。时间显式传入，轮询节奏由调用方
/// 按 [`SurfaceConfig`] 控制。
#[derive(Debug, Clone)]
pub struct CooldownGate {
    cooldown: Duration,
    last_change: Option<Instant>,
}

impl CooldownGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_change: None,
        }
    }

    /// 记录一次内容变化观察
    pub fn observe_change(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    /// 冷却窗口是否已静默期满
    ///
    /// 从未观察到变化时视为已静默（内容一开始就是稳定的）。
    pub fn settled(&self, now: Instant) -> bool {
        match self.last_change {
            Some(last) => now.duration_since(last) >= self.cooldown,
            None => true,
        }
    }
}

impl Default for CooldownGate {
    fn default() -> Self {
        Self::new(SurfaceConfig::default().cooldown)
    }
}
