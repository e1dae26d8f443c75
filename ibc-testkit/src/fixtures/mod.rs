pub mod core;

use std::fmt::Debug;

use ibc_core::handler::types::error::ContextError;
use ibc_core::primitives::prelude::*;

use crate::context::MockContext;

pub enum Expect {
    Success,
    Failure(Option<ContextError>),
}

/// A mock chain and a message to run against it.
#[derive(Debug)]
pub struct Fixture<M: Debug> {
    pub ctx: MockContext,
    pub msg: M,
}

impl<M: Debug> Fixture<M> {
    pub fn generate_error_msg(
        &self,
        expect: &Expect,
        process: &str,
        res: &Result<(), ContextError>,
    ) -> String {
        let base_error = match expect {
            Expect::Success => "step failed!",
            Expect::Failure(_) => "step passed but was supposed to fail!",
        };
        format!(
            "{process} {base_error} /n {res:?} /n {:?} /n {:?}",
            &self.msg, &self.ctx
        )
    }
}
