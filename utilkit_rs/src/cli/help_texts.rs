//! Static texts printed by the interactive loop and the binary.

pub const BANNER: &str = "\
===== utilkit interactive tools =====
Type 'help' for help, 'exit' to quit
Command format: package:function [args...] (e.g. strutil:Trim '  hello  ')
=====================================";

pub const HELP: &str = "\
Help:
  Command format: package:function [args...]
  Quote arguments with '...' or \"...\" to keep spaces.
  Special commands:
    help   - show this help
    list   - show all available functions
    exit   - quit (also: quit)
  Examples:
    strutil:Trim '  hello world  '
    strutil:ToUpper 'hello'
    fileutil:DirStat ./dist 1048576 false";

pub const PROMPT: &str = "> ";
