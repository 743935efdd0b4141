/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : Module trait 与模块树遍历单元测试
 */

use crate::nn::layer::{Container, Conv2d, Elementwise, MaxPool2d, Sequential};
use crate::nn::{Module, Spatial, get_layer_names, module_depth, named_modules};

/// 自定义叶子模块：不覆盖 `spatial()`
#[derive(Debug)]
struct Flatten;

impl Module for Flatten {
    fn type_name(&self) -> &str {
        "Flatten"
    }
}

fn small_net() -> Container {
    Container::new("Net")
        .add(
            "features",
            Sequential::new()
                .add(Conv2d::square(3, 8, 3, 1, 1))
                .add(Elementwise::new("ReLU"))
                .add(MaxPool2d::new((2, 2), None)),
        )
        .add("head", Conv2d::square(8, 2, 1, 1, 0))
}

#[test]
fn test_named_modules_preorder() {
    let net = small_net();
    let names = get_layer_names(&net);

    assert_eq!(
        names,
        vec!["", "features", "features.0", "features.1", "features.2", "head"]
    );

    let types: Vec<String> = named_modules(&net)
        .into_iter()
        .map(|(_, m)| m.type_name().to_string())
        .collect();
    assert_eq!(
        types,
        vec!["Net", "Sequential", "Conv2d", "ReLU", "MaxPool2d", "Conv2d"]
    );
}

#[test]
fn test_named_modules_nested_sequential() {
    let net = Sequential::new()
        .add(Sequential::new().add(Sequential::new().add(Elementwise::new("Identity"))))
        .add_named("out", Conv2d::square(1, 1, 1, 1, 0));

    assert_eq!(get_layer_names(&net), vec!["", "0", "0.0", "0.0.0", "out"]);
}

#[test]
fn test_module_depth() {
    assert_eq!(module_depth(""), 0);
    assert_eq!(module_depth("features"), 1);
    assert_eq!(module_depth("features.0"), 2);
    assert_eq!(module_depth("layer1.0.conv1"), 3);
}

#[test]
fn test_is_container() {
    // 空的 Sequential 仍是容器
    assert!(Sequential::new().is_container());
    assert!(small_net().is_container());
    // 没有子模块的自定义模块按叶子处理
    assert!(!Container::new("Empty").is_container());
    assert!(!Conv2d::square(1, 1, 3, 1, 1).is_container());
}

#[test]
fn test_spatial_kinds() {
    assert!(matches!(
        Conv2d::square(1, 1, 3, 1, 1).spatial(),
        Spatial::Window(_)
    ));
    assert_eq!(Elementwise::new("ReLU").spatial(), Spatial::Passthrough);
    assert_eq!(Flatten.spatial(), Spatial::Unsupported);
    assert_eq!(Container::new("Empty").spatial(), Spatial::Unsupported);
}
