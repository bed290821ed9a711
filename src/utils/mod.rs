//! # 常用接口模块
//!
//! 本模块提供单元测试及集成测试中常用的断言宏

pub mod macro_for_unit_test;
