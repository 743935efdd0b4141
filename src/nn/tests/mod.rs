mod layer_conv2d;
mod layer_pool2d;
mod module_trait;
