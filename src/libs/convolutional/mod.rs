pub mod convolutional_encoder;
