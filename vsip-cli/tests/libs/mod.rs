use std::{env, ffi::OsStr};

use laboratory::{Suite, describe};

use crate::TestState;


pub fn suite() -> Suite<TestState> {
    describe("libs", |context| {
        context.describe("config", |context| {
            context.it("apply_default", config::apply_default);
            context.it("reg_args", config::reg_args);
            context.it("read_args", config::read_args);
            context.it("client_options", config::client_options);
        });

        context.describe("cli", |context| {
            context.it("reg_args", cli::reg_args);
            context.it("get_param", cli::get_param);
            context.it("require_param", cli::require_param);
            context.it("run without credentials", cli::run_no_credentials);
        });

        context.describe_import(workflow::suite());
    })
}

fn set_env_var(key: &str, val: &str) {
    unsafe {
        env::set_var(&OsStr::new(key), val);
    }
}

fn remove_env_var(key: &str) {
    unsafe {
        env::remove_var(&OsStr::new(key));
    }
}
