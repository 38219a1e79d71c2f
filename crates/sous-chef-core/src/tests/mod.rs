mod machine;
mod support;
