//! Tenant-scoped statement builder.
//!
//! Every analytics statement is created through [`TenantQuery`], which emits
//! `where organization_id = $n` bound to the tenant before any caller-supplied
//! predicate. There is no constructor that skips the tenant filter.

use apex_common::types::TenantId;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{Encode, Postgres, QueryBuilder, Type};

pub struct TenantQuery<'args> {
    qb: QueryBuilder<'args, Postgres>,
}

impl<'args> TenantQuery<'args> {
    /// `select <columns> from <table> where organization_id = $1`
    pub fn select(tenant: TenantId, columns: &str, table: &str) -> Self {
        Self::select_with(tenant, table, |qb| {
            qb.push(columns);
        })
    }

    /// Like [`TenantQuery::select`] for select lists that need their own binds.
    /// Binds pushed by `columns` are numbered before the tenant bind.
    pub fn select_with<F>(tenant: TenantId, table: &str, columns: F) -> Self
    where
        F: FnOnce(&mut QueryBuilder<'args, Postgres>),
    {
        let mut qb = QueryBuilder::new("select ");
        columns(&mut qb);
        qb.push(" from ")
            .push(table)
            .push(" where organization_id = ")
            .push_bind(tenant.as_uuid());
        Self { qb }
    }

    /// Append a literal predicate. Only static SQL belongs here.
    pub fn and(mut self, predicate: &str) -> Self {
        self.qb.push(" and ").push(predicate);
        self
    }

    pub fn and_eq<T>(mut self, column: &str, value: T) -> Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres>,
    {
        self.qb
            .push(" and ")
            .push(column)
            .push(" = ")
            .push_bind(value);
        self
    }

    pub fn and_gte<T>(mut self, column: &str, value: T) -> Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres>,
    {
        self.qb
            .push(" and ")
            .push(column)
            .push(" >= ")
            .push_bind(value);
        self
    }

    pub fn and_in(mut self, column: &str, values: &[&str]) -> Self {
        let owned: Vec<String> = values.iter().map(|v| (*v).to_owned()).collect();
        self.qb
            .push(" and ")
            .push(column)
            .push(" = any(")
            .push_bind(owned)
            .push(")");
        self
    }

    pub fn and_not_in(mut self, column: &str, values: &[&str]) -> Self {
        let owned: Vec<String> = values.iter().map(|v| (*v).to_owned()).collect();
        self.qb
            .push(" and not (")
            .push(column)
            .push(" = any(")
            .push_bind(owned)
            .push("))");
        self
    }

    /// Trailing clause such as `group by` / `order by`.
    pub fn then(mut self, clause: &str) -> Self {
        self.qb.push(" ").push(clause);
        self
    }

    pub fn limit(mut self, n: i64) -> Self {
        self.qb.push(" limit ").push_bind(n);
        self
    }

    pub fn sql(&self) -> &str {
        self.qb.sql()
    }

    pub fn build(&mut self) -> Query<'_, Postgres, PgArguments> {
        self.qb.build()
    }
}
