// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command};

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .short('u')
        .required(true)
        .help("Owner the operation applies to")
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .required(true)
        .help("Month as YYYY-MM")
}

fn with_json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    command!()
        .about("Personal income/expense ledger with budgets, goals, and recurring transactions")
        .subcommand(
            Command::new("user")
                .about("Register and authenticate users, inspect balances")
                .subcommand(
                    Command::new("register")
                        .about("Create a user")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("secret").long("secret").required(true)),
                )
                .subcommand(
                    Command::new("login")
                        .about("Check credentials")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("secret").long("secret").required(true)),
                )
                .subcommand(
                    Command::new("balance")
                        .about("Show the cached running balance")
                        .arg(user_arg()),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record an income or expense")
                        .arg(user_arg())
                        .arg(Arg::new("kind").long("kind").required(true).help("income|expense"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .default_value(""),
                        )
                        .arg(Arg::new("method").long("method").help("Payment method"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("Occurrence date (YYYY-MM-DD), defaults to today"),
                        ),
                )
                .subcommand(with_json_flags(
                    Command::new("list")
                        .about("List the owner's transactions in insertion order")
                        .arg(user_arg()),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Update fields of a transaction; omitted fields keep their value")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("kind").long("kind"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("method").long("method"))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction by id")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(with_json_flags(
                    Command::new("search")
                        .about("Search by category, date window, or keyword pattern")
                        .arg(user_arg())
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("from").long("from").help("Inclusive start date"))
                        .arg(Arg::new("to").long("to").help("Inclusive end date"))
                        .arg(
                            Arg::new("pattern")
                                .long("pattern")
                                .help("Keyword matched against category and description"),
                        ),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Derived views over the ledger")
                .subcommand(with_json_flags(
                    Command::new("dashboard")
                        .about("Total income, total expense, net balance")
                        .arg(user_arg()),
                ))
                .subcommand(with_json_flags(
                    Command::new("monthly")
                        .about("Income/expense summary for one month")
                        .arg(user_arg())
                        .arg(month_arg()),
                ))
                .subcommand(with_json_flags(
                    Command::new("categories")
                        .about("Expense totals by category, highest first")
                        .arg(user_arg()),
                ))
                .subcommand(with_json_flags(
                    Command::new("budget")
                        .about("Spending against the month's budget")
                        .arg(user_arg())
                        .arg(month_arg()),
                ))
                .subcommand(with_json_flags(
                    Command::new("health")
                        .about("Heuristic financial health score")
                        .arg(user_arg()),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly spending limits")
                .subcommand(
                    Command::new("set")
                        .about("Set (or overwrite) a month's limit")
                        .arg(user_arg())
                        .arg(month_arg())
                        .arg(Arg::new("limit").long("limit").required(true)),
                )
                .subcommand(with_json_flags(
                    Command::new("list")
                        .about("List the owner's budgets")
                        .arg(user_arg()),
                )),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("set")
                        .about("Create or overwrite a goal")
                        .arg(user_arg())
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true)),
                )
                .subcommand(with_json_flags(
                    Command::new("list")
                        .about("Show goal progress against net savings")
                        .arg(user_arg()),
                )),
        )
        .subcommand(
            Command::new("recurring")
                .about("Recurring transaction templates")
                .subcommand(
                    Command::new("add")
                        .about("Register a template, due immediately")
                        .arg(user_arg())
                        .arg(Arg::new("kind").long("kind").required(true).help("income|expense"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .required(true)
                                .help("daily|weekly|monthly"),
                        )
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .default_value(""),
                        ),
                )
                .subcommand(with_json_flags(
                    Command::new("list")
                        .about("List the owner's templates and next due dates")
                        .arg(user_arg()),
                ))
                .subcommand(
                    Command::new("process")
                        .about("Materialize every due template once and advance its cursor")
                        .arg(user_arg()),
                ),
        )
}
